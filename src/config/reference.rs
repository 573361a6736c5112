// ==========================================
// 备餐排单系统 - 参照表定义
// ==========================================
// 依据: Field_Mapping_Spec_v1.1.md - 标准字段映射表
// ==========================================
// 职责: 表头映射 / 口味映射 / 蛋白信息表
// 红线: 参照数据由调用方提供,引擎不取数
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// 标准字段名
// ==========================================

/// 表头映射的标准目标字段
pub mod canonical_fields {
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const ITEM_DESCRIPTION: &str = "item_description";
    pub const QUANTITY: &str = "quantity";
    pub const FLAVOR_LABEL: &str = "flavor_label";
    pub const PROTEIN_LABEL: &str = "protein_label";
}

// ==========================================
// HeaderMap - 表头映射表
// ==========================================

/// 上传表头 → 标准字段名映射
///
/// 同一标准字段允许多个上传表头别名（历史导出模板不一致）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderMap {
    /// 上传表头 → 标准字段名
    pub mappings: HashMap<String, String>,
}

impl HeaderMap {
    /// 在一行原始记录中查找标准字段对应的取值
    ///
    /// # 返回
    /// - Some(value): 命中且非空白
    /// - None: 未命中或值为空白
    pub fn lookup<'a>(
        &self,
        row: &'a HashMap<String, String>,
        canonical: &str,
    ) -> Option<&'a str> {
        for (header, target) in &self.mappings {
            if target == canonical {
                if let Some(value) = row.get(header) {
                    let trimmed = value.trim();
                    if !trimmed.is_empty() {
                        return Some(trimmed);
                    }
                }
            }
        }
        None
    }
}

// ==========================================
// FlavorMap - 口味映射表
// ==========================================

/// 口味条目（代码 + 显示标签）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlavorEntry {
    pub code: String,
    pub label: String,
}

/// 标准化后口味标签 → (代码, 标签)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlavorMap {
    pub entries: HashMap<String, FlavorEntry>,
}

impl FlavorMap {
    pub fn get(&self, canonical_label: &str) -> Option<&FlavorEntry> {
        self.entries.get(canonical_label)
    }
}

// ==========================================
// ProteinTable - 蛋白信息表
// ==========================================

/// 单个蛋白的业务参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProteinInfo {
    /// 显示标签
    pub label: String,

    /// 缩水率（百分数,烹饪后重量 = 生重 × (1 + shrink_pct/100)）
    pub shrink_pct: f64,

    /// 采购单位磅数（报表采购建议用）
    pub lbs_per_unit: f64,

    /// 备货是否按口味区分（false 的类目按蛋白整体匹配,如红薯/蔬菜）
    #[serde(default = "default_flavor_keyed")]
    pub flavor_keyed: bool,
}

fn default_flavor_keyed() -> bool {
    true
}

/// 蛋白代码 → 蛋白信息
///
/// 订单中出现而表内缺失的蛋白代码属于调用方契约违约,
/// 整次运行以结构性错误终止（参照数据与订单数据脱节）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProteinTable {
    pub entries: HashMap<String, ProteinInfo>,
}

impl ProteinTable {
    pub fn get(&self, protein_code: &str) -> Option<&ProteinInfo> {
        self.entries.get(protein_code)
    }
}

// ==========================================
// ReferenceTables - 参照表汇总
// ==========================================

/// 一次运行所需的全部参照数据
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub header_map: HeaderMap,
    pub flavor_map: FlavorMap,
    pub protein_table: ProteinTable,
}
