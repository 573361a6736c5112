// ==========================================
// 备餐排单系统 - 字段映射器实现
// ==========================================
// 依据: Field_Mapping_Spec_v1.1.md - 标准字段映射表
// 职责: 上传表头 → 标准字段提取 + 类型转换
// ==========================================

use crate::config::reference::{canonical_fields, HeaderMap};
use crate::domain::order::RawOrderRecord;
use std::collections::HashMap;

pub struct FieldMapper;

impl FieldMapper {
    /// 将一行上传记录提取为原始订单记录
    ///
    /// 只做提取与类型转换,不做必填校验；解析失败的字段置 None,
    /// 由标准化器统一汇总缺失字段清单。
    pub fn extract(
        row: &HashMap<String, String>,
        header_map: &HeaderMap,
        row_number: usize,
    ) -> RawOrderRecord {
        let first_name = header_map.lookup(row, canonical_fields::FIRST_NAME);
        let last_name = header_map.lookup(row, canonical_fields::LAST_NAME);

        // 全名 = 名 + 空格 + 姓；任一半缺失即整体缺失
        let full_name = match (first_name, last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            _ => None,
        };

        // 数量必须为正整数；非法值置 None 交由校验上报
        let quantity = header_map
            .lookup(row, canonical_fields::QUANTITY)
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|q| *q >= 1);

        RawOrderRecord {
            full_name,
            item_description: header_map
                .lookup(row, canonical_fields::ITEM_DESCRIPTION)
                .map(str::to_string),
            quantity,
            flavor_label: header_map
                .lookup(row, canonical_fields::FLAVOR_LABEL)
                .map(str::to_string),
            protein_label: header_map
                .lookup(row, canonical_fields::PROTEIN_LABEL)
                .map(str::to_string),
            container_size: None,
            weight_oz: None,
            row_number,
        }
    }
}
