// ==========================================
// 备餐排单系统 - 订单实体
// ==========================================
// 依据: Order_Engine_Specs_v1.2.md - 3. 数据模型
// 红线: Order 不允许部分构造,任一必填字段缺失整行拒绝
// ==========================================

use crate::domain::types::ContainerSize;
use serde::{Deserialize, Serialize};

// ==========================================
// RawOrderRecord - 原始订单记录
// ==========================================

/// 上传行经字段映射后的原始视图（未经校验）
///
/// 仅用于标准化阶段与错误上报,不进入下游聚合。
/// 被拒绝的行随 OrderError 携带此记录,避免构造半成品 Order。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawOrderRecord {
    /// 客户全名（名 + 空格 + 姓）
    pub full_name: Option<String>,

    /// 商品描述原文（含容器规格文本）
    pub item_description: Option<String>,

    /// 数量（解析失败时为 None）
    pub quantity: Option<u32>,

    /// 口味标签原文
    pub flavor_label: Option<String>,

    /// 蛋白标签原文（缺失 = 纯素餐,非错误）
    pub protein_label: Option<String>,

    /// 解析出的容器规格
    pub container_size: Option<ContainerSize>,

    /// 本行总净重（盎司,单份重量 × 数量）
    pub weight_oz: Option<f64>,

    /// 上传文件内行号（1 起,不含表头）
    pub row_number: usize,
}

// ==========================================
// Order - 订单行项目
// ==========================================

/// 完整解析后的订单行项目（构造后不可变）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// 客户全名
    pub full_name: String,

    /// 商品描述原文
    pub item_description: String,

    /// 容器规格
    pub container_size: ContainerSize,

    /// 本行总净重（盎司,已乘数量）
    pub weight_oz: f64,

    /// 蛋白代码（空串 = 纯素餐）
    pub protein_code: String,

    /// 蛋白显示标签
    pub protein_label: String,

    /// 口味代码（纯素餐为空串）
    pub flavor_code: String,

    /// 口味显示标签
    pub flavor_label: String,

    /// 数量（>= 1）
    pub quantity: u32,
}

impl Order {
    /// 是否为纯素餐（无蛋白成分,不参与食材聚合）
    pub fn is_veggie_only(&self) -> bool {
        self.protein_code.is_empty()
    }
}

// ==========================================
// OrderError - 行级校验错误
// ==========================================

/// 行级校验错误（一等输出,非异常通道）
///
/// 一行只产生一条错误,message 汇总该行全部问题。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderError {
    /// 上传文件内行号
    pub row_number: usize,

    /// 问题描述（缺失字段全列出）
    pub message: String,

    /// 违规行的原始记录
    pub record: RawOrderRecord,
}
