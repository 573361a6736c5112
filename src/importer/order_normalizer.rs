// ==========================================
// 备餐排单系统 - 订单标准化器实现
// ==========================================
// 依据: Order_Engine_Specs_v1.2.md - 4.1 Order Normalizer
// 职责: 原始行记录 → 类型化 Order + 行级错误列表
// 红线: 行级失败不中断批次,一行一条错误
// ==========================================

use crate::config::reference::{FlavorMap, HeaderMap};
use crate::domain::order::{Order, OrderError};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UploadRow;
use crate::importer::label_cleaner::LabelCleaner;
use std::collections::HashMap;
use tracing::debug;

pub struct OrderNormalizer;

/// 标准化输出（有效订单 + 行级错误,两者都是一等结果）
#[derive(Debug, Clone, Default)]
pub struct NormalizationResult {
    pub orders: Vec<Order>,
    pub errors: Vec<OrderError>,
}

impl OrderNormalizer {
    /// 标准化整批上传行
    ///
    /// 逐行提取、解析容器规格、标准化口味/蛋白标签；
    /// 任一问题使该行整体被拒并记录一条 OrderError,
    /// 批次继续处理剩余行（部分失败语义,非整批中止）。
    /// 错误引用 UploadRow 携带的文件内行号,空白行造成的
    /// 行号空档原样保留,保证与上传文件逐行对得上。
    pub fn normalize(
        raw_rows: &[UploadRow],
        header_map: &HeaderMap,
        flavor_map: &FlavorMap,
    ) -> NormalizationResult {
        let mut result = NormalizationResult::default();

        for row in raw_rows {
            match Self::normalize_row(&row.fields, header_map, flavor_map, row.line_number) {
                Ok(order) => result.orders.push(order),
                Err(error) => result.errors.push(error),
            }
        }

        debug!(
            valid = result.orders.len(),
            rejected = result.errors.len(),
            "订单标准化完成"
        );
        result
    }

    /// 标准化单行
    fn normalize_row(
        row: &HashMap<String, String>,
        header_map: &HeaderMap,
        flavor_map: &FlavorMap,
        row_number: usize,
    ) -> Result<Order, OrderError> {
        let mut record = FieldMapper::extract(row, header_map, row_number);
        let mut issues: Vec<String> = Vec::new();

        // 1. 容器规格 + 本行总净重（需描述与数量同时在场才能推导）
        if let (Some(description), Some(quantity)) =
            (record.item_description.as_deref(), record.quantity)
        {
            match LabelCleaner::parse_container(description, quantity) {
                Ok((size, weight)) => {
                    record.container_size = Some(size);
                    record.weight_oz = Some(weight);
                }
                Err(issue) => issues.push(issue),
            }
        }

        // 2. 必填字段缺失清单（一条消息列全,不逐条拆分）
        let mut missing: Vec<&str> = Vec::new();
        if record.full_name.is_none() {
            missing.push("full_name");
        }
        if record.item_description.is_none() {
            missing.push("item_description");
        }
        if record.quantity.is_none() {
            missing.push("quantity");
        }
        if !missing.is_empty() {
            issues.push(format!("missing required fields: {}", missing.join(", ")));
        }

        // 3. 蛋白标签折叠（空标签 = 纯素餐,合法）
        let protein_code = LabelCleaner::protein_code_from_label(record.protein_label.as_deref());

        // 4. 口味标准化与映射（纯素餐跳过,Order 口味字段留空）
        let mut flavor_code = String::new();
        let mut flavor_label = String::new();
        if protein_code.is_some() {
            let canonical =
                LabelCleaner::canonical_flavor_label(record.flavor_label.as_deref().unwrap_or(""));
            match flavor_map.get(&canonical) {
                Some(entry) => {
                    flavor_code = entry.code.clone();
                    flavor_label = entry.label.clone();
                }
                None => issues.push(format!("unmapped flavor label: {}", canonical)),
            }
        }

        if !issues.is_empty() {
            return Err(OrderError {
                row_number,
                message: issues.join("; "),
                record,
            });
        }

        // 至此全部必填字段已验证在场
        Ok(Order {
            full_name: record.full_name.clone().unwrap_or_default(),
            item_description: record.item_description.clone().unwrap_or_default(),
            container_size: record.container_size.unwrap_or(crate::domain::ContainerSize::Bulk),
            weight_oz: record.weight_oz.unwrap_or_default(),
            protein_label: record
                .protein_label
                .clone()
                .filter(|_| protein_code.is_some())
                .unwrap_or_default(),
            protein_code: protein_code.unwrap_or_default(),
            flavor_code,
            flavor_label,
            quantity: record.quantity.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::reference::{canonical_fields, FlavorEntry};
    use crate::domain::ContainerSize;

    fn test_header_map() -> HeaderMap {
        let mut mappings = HashMap::new();
        mappings.insert("First Name".into(), canonical_fields::FIRST_NAME.into());
        mappings.insert("Last Name".into(), canonical_fields::LAST_NAME.into());
        mappings.insert("Item".into(), canonical_fields::ITEM_DESCRIPTION.into());
        mappings.insert("Qty".into(), canonical_fields::QUANTITY.into());
        mappings.insert("Flavor".into(), canonical_fields::FLAVOR_LABEL.into());
        mappings.insert("Protein".into(), canonical_fields::PROTEIN_LABEL.into());
        HeaderMap { mappings }
    }

    fn test_flavor_map() -> FlavorMap {
        let mut entries = HashMap::new();
        entries.insert(
            "COMPETITOR-PREP (100% PLAIN-PLAIN)".to_string(),
            FlavorEntry {
                code: "plain".to_string(),
                label: "COMPETITOR-PREP (100% PLAIN-PLAIN)".to_string(),
            },
        );
        entries.insert(
            "SPICY BEEF BISON".to_string(),
            FlavorEntry {
                code: "spicyBison".to_string(),
                label: "SPICY BEEF BISON".to_string(),
            },
        );
        FlavorMap { entries }
    }

    fn test_row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// 按切片顺序连续编号包装为上传行
    fn upload_rows(maps: Vec<HashMap<String, String>>) -> Vec<UploadRow> {
        maps.into_iter()
            .enumerate()
            .map(|(idx, fields)| UploadRow {
                line_number: idx + 1,
                fields,
            })
            .collect()
    }

    #[test]
    fn test_normalize_valid_protein_row() {
        let rows = upload_rows(vec![test_row(&[
            ("First Name", "Ada"),
            ("Last Name", "Lovelace"),
            ("Item", "Bison 4oz"),
            ("Qty", "2"),
            ("Flavor", "SPICY BISON"),
            ("Protein", "Beef Bison"),
        ])]);
        let result = OrderNormalizer::normalize(&rows, &test_header_map(), &test_flavor_map());

        assert!(result.errors.is_empty());
        assert_eq!(result.orders.len(), 1);
        let order = &result.orders[0];
        assert_eq!(order.full_name, "Ada Lovelace");
        assert_eq!(order.container_size, ContainerSize::Oz4);
        assert_eq!(order.weight_oz, 8.0);
        assert_eq!(order.protein_code, "beefBison");
        assert_eq!(order.flavor_code, "spicyBison");
    }

    #[test]
    fn test_normalize_veggie_only_row() {
        let rows = upload_rows(vec![test_row(&[
            ("First Name", "Grace"),
            ("Last Name", "Hopper"),
            ("Item", "Veggie Medley 6oz"),
            ("Qty", "5"),
        ])]);
        let result = OrderNormalizer::normalize(&rows, &test_header_map(), &test_flavor_map());

        assert!(result.errors.is_empty());
        let order = &result.orders[0];
        assert!(order.is_veggie_only());
        assert_eq!(order.protein_code, "");
        assert_eq!(order.flavor_code, "");
        assert_eq!(order.weight_oz, 30.0);
    }

    #[test]
    fn test_normalize_missing_fields_single_error() {
        // 缺名又缺数量: 一行只产生一条错误,缺失字段全列出
        let rows = upload_rows(vec![test_row(&[("Item", "Chicken 4oz"), ("Protein", "Chicken")])]);
        let result = OrderNormalizer::normalize(&rows, &test_header_map(), &test_flavor_map());

        assert!(result.orders.is_empty());
        assert_eq!(result.errors.len(), 1);
        let error = &result.errors[0];
        assert!(error.message.contains("full_name"));
        assert!(error.message.contains("quantity"));
        assert_eq!(error.row_number, 1);
    }

    #[test]
    fn test_normalize_unmapped_flavor_is_row_error() {
        let rows = upload_rows(vec![test_row(&[
            ("First Name", "Ada"),
            ("Last Name", "Lovelace"),
            ("Item", "Chicken 4oz"),
            ("Qty", "1"),
            ("Flavor", "MYSTERY GLAZE"),
            ("Protein", "Chicken"),
        ])]);
        let result = OrderNormalizer::normalize(&rows, &test_header_map(), &test_flavor_map());

        assert!(result.orders.is_empty());
        assert!(result.errors[0].message.contains("unmapped flavor label: MYSTERY GLAZE"));
    }

    #[test]
    fn test_normalize_unexpected_container_continues_batch() {
        let rows = upload_rows(vec![
            test_row(&[
                ("First Name", "Ada"),
                ("Last Name", "Lovelace"),
                ("Item", "Chicken 7oz"),
                ("Qty", "1"),
                ("Protein", "Chicken"),
                ("Flavor", "100% PLAIN-PLAIN"),
            ]),
            test_row(&[
                ("First Name", "Grace"),
                ("Last Name", "Hopper"),
                ("Item", "Chicken 2 lbs"),
                ("Qty", "1"),
                ("Protein", "Chicken"),
                ("Flavor", "100% PLAIN-PLAIN"),
            ]),
        ]);
        let result = OrderNormalizer::normalize(&rows, &test_header_map(), &test_flavor_map());

        // 第一行拒绝,第二行照常通过
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("unexpected container size: 7oz"));
        assert_eq!(result.orders.len(), 1);
        assert_eq!(result.orders[0].container_size, ContainerSize::Bulk);
        assert_eq!(result.orders[0].weight_oz, 32.0);
    }

    #[test]
    fn test_normalize_empty_flavor_maps_to_plain() {
        let rows = upload_rows(vec![test_row(&[
            ("First Name", "Ada"),
            ("Last Name", "Lovelace"),
            ("Item", "Chicken 8oz"),
            ("Qty", "1"),
            ("Protein", "Chicken"),
        ])]);
        let result = OrderNormalizer::normalize(&rows, &test_header_map(), &test_flavor_map());

        assert!(result.errors.is_empty());
        assert_eq!(result.orders[0].flavor_code, "plain");
    }

    #[test]
    fn test_error_row_number_survives_blank_line_gap() {
        // 文件第 2 行空白被解析层跳过: 第 3 行的错误必须仍报 3,不得缩位
        let rows = vec![
            UploadRow {
                line_number: 1,
                fields: test_row(&[
                    ("First Name", "Ada"),
                    ("Last Name", "Lovelace"),
                    ("Item", "Chicken 4oz"),
                    ("Qty", "1"),
                    ("Protein", "Chicken"),
                ]),
            },
            UploadRow {
                line_number: 3,
                fields: test_row(&[
                    ("First Name", "Grace"),
                    ("Last Name", "Hopper"),
                    ("Item", "Chicken 7oz"),
                    ("Qty", "1"),
                    ("Protein", "Chicken"),
                ]),
            },
        ];
        let result = OrderNormalizer::normalize(&rows, &test_header_map(), &test_flavor_map());

        assert_eq!(result.orders.len(), 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].row_number, 3);
        assert_eq!(result.errors[0].record.row_number, 3);
    }
}
