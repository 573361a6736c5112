// ==========================================
// 备餐排单系统 - 食材需求与成品实体
// ==========================================
// 依据: Order_Engine_Specs_v1.2.md - 3. 数据模型
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// IngredientRequirement - 食材需求
// ==========================================

/// 按 (蛋白, 口味) 聚合的生料需求
///
/// weight_oz = 该键下所有订单行净重之和。
/// 显示标签取首次写入该键的订单；领域约定同一代码不存在
/// 互相矛盾的标签,后续订单标签视为一致。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientRequirement {
    /// 蛋白显示标签
    pub protein_label: String,

    /// 口味显示标签
    pub flavor_label: String,

    /// 累计生料需求（盎司）
    pub weight_oz: f64,
}

// ==========================================
// Meal - 成品统计行
// ==========================================

/// 每个 (蛋白, 口味) 键的最终输出行（每次运行重算,不可手改）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    /// 蛋白代码
    pub protein_code: String,

    /// 口味代码
    pub flavor_code: String,

    /// 蛋白显示标签
    pub protein_label: String,

    /// 口味显示标签
    pub flavor_label: String,

    /// 分配前原始需求（盎司）
    pub original_weight_oz: f64,

    /// 扣除备货后的待烹重量（盎司）
    pub final_weight_oz: f64,

    /// 消耗的备货总重（盎司）
    pub backstock_weight_oz: f64,

    /// 缩水调整后的熟重（盎司,两位小数）
    pub cooked_weight_oz: f64,

    /// 磅+盎司显示串（如 "1lb 4oz"）
    pub display_weight: String,
}
