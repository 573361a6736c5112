// ==========================================
// 备餐排单系统 - 食材聚合引擎
// ==========================================
// 依据: Order_Engine_Specs_v1.2.md - 4.2 Ingredient Aggregator
// ==========================================
// 职责: 有效订单 → 客户统计 + (蛋白,口味) 生料需求
// 红线: 统计只由订单推导,不受分配结果影响
// ==========================================

use crate::config::EngineConfig;
use crate::domain::meal::IngredientRequirement;
use crate::domain::order::Order;
use crate::domain::stats::OrderStatistics;
use crate::engine::error::{EngineError, EngineResult};
use std::collections::BTreeMap;
use tracing::debug;

// ==========================================
// AggregationResult - 聚合结果
// ==========================================

/// 聚合输出: 统计 + 蛋白→口味→需求 两级映射
///
/// 两级映射采用 BTreeMap,天然给出下游报表要求的
/// 蛋白→口味确定性排序。
#[derive(Debug, Clone)]
pub struct AggregationResult {
    pub statistics: OrderStatistics,
    pub requirements: BTreeMap<String, BTreeMap<String, IngredientRequirement>>,
}

// ==========================================
// IngredientAggregator - 食材聚合引擎
// ==========================================
pub struct IngredientAggregator;

impl IngredientAggregator {
    /// 折叠整批有效订单
    ///
    /// # 规则
    /// - orders 统计 = 去重客户数；答谢袋 = Σ ceil(客户总量 / 分块)
    /// - meals / containers 按数量累加
    /// - 无蛋白订单计入 veggie_meals,跳过食材累加
    /// - 其余累加入 (蛋白, 口味) 桶,标签首写生效
    ///
    /// # 错误
    /// - EmptyOrderSet: 无可聚合订单（调用方契约违约）
    pub fn aggregate(orders: &[Order], config: &EngineConfig) -> EngineResult<AggregationResult> {
        if orders.is_empty() {
            return Err(EngineError::EmptyOrderSet);
        }

        let mut statistics = OrderStatistics::default();
        let mut requirements: BTreeMap<String, BTreeMap<String, IngredientRequirement>> =
            BTreeMap::new();
        let mut customer_totals: BTreeMap<&str, u32> = BTreeMap::new();

        for order in orders {
            *customer_totals.entry(order.full_name.as_str()).or_insert(0) += order.quantity;

            statistics.meals += order.quantity;
            *statistics.containers.entry(order.container_size).or_insert(0) += order.quantity;

            if order.is_veggie_only() {
                statistics.veggie_meals += order.quantity;
                continue;
            }

            let requirement = requirements
                .entry(order.protein_code.clone())
                .or_default()
                .entry(order.flavor_code.clone())
                .or_insert_with(|| IngredientRequirement {
                    // 标签首写生效；领域约定同码标签一致
                    protein_label: order.protein_label.clone(),
                    flavor_label: order.flavor_label.clone(),
                    weight_oz: 0.0,
                });
            requirement.weight_oz += order.weight_oz;
        }

        statistics.orders = customer_totals.len() as u32;
        statistics.thank_you_bags = customer_totals
            .values()
            .map(|total| total.div_ceil(config.thank_you_bag_block))
            .sum();

        debug!(
            orders = statistics.orders,
            meals = statistics.meals,
            veggie_meals = statistics.veggie_meals,
            thank_you_bags = statistics.thank_you_bags,
            requirement_keys = requirements.values().map(|f| f.len()).sum::<usize>(),
            "食材聚合完成"
        );

        Ok(AggregationResult {
            statistics,
            requirements,
        })
    }
}
