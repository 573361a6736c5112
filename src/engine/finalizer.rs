// ==========================================
// 备餐排单系统 - 报表装配器
// ==========================================
// 依据: Order_Engine_Specs_v1.2.md - 4.5 Statistics Finalizer
// 职责: 纯装配,无进一步计算
// 红线: 成品列表必须蛋白→口味排序（分配平局随机,报表次序必须确定）
// ==========================================

use crate::domain::meal::Meal;
use crate::domain::order::OrderError;
use crate::domain::stats::{OrderReport, OrderStatistics};
use chrono::Utc;
use uuid::Uuid;

pub struct ReportFinalizer;

impl ReportFinalizer {
    /// 装配最终运行报表
    ///
    /// 聚合统计、成品列表、行级错误与消耗 id 合并为一份
    /// 报表对象,交外部渲染层与持久层。
    pub fn finalize(
        run_id: Uuid,
        statistics: OrderStatistics,
        mut meals: Vec<Meal>,
        errors: Vec<OrderError>,
        mut consumed_backstock_ids: Vec<i64>,
    ) -> OrderReport {
        // 上游 BTreeMap 已按键序产出,此处再断言一次排序约定
        meals.sort_by(|a, b| {
            (a.protein_code.as_str(), a.flavor_code.as_str())
                .cmp(&(b.protein_code.as_str(), b.flavor_code.as_str()))
        });
        consumed_backstock_ids.sort_unstable();

        OrderReport {
            run_id,
            generated_at: Utc::now(),
            statistics,
            meals,
            errors,
            consumed_backstock_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(protein: &str, flavor: &str) -> Meal {
        Meal {
            protein_code: protein.to_string(),
            flavor_code: flavor.to_string(),
            protein_label: protein.to_uppercase(),
            flavor_label: flavor.to_uppercase(),
            original_weight_oz: 10.0,
            final_weight_oz: 10.0,
            backstock_weight_oz: 0.0,
            cooked_weight_oz: 7.5,
            display_weight: "0lbs 8oz".to_string(),
        }
    }

    #[test]
    fn test_meals_sorted_protein_then_flavor() {
        let meals = vec![
            meal("chicken", "teriyaki"),
            meal("beefBison", "plain"),
            meal("chicken", "bbq"),
        ];
        let report = ReportFinalizer::finalize(
            Uuid::new_v4(),
            OrderStatistics::default(),
            meals,
            Vec::new(),
            vec![9, 2, 5],
        );

        let keys: Vec<(&str, &str)> = report
            .meals
            .iter()
            .map(|m| (m.protein_code.as_str(), m.flavor_code.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![("beefBison", "plain"), ("chicken", "bbq"), ("chicken", "teriyaki")]
        );
        assert_eq!(report.consumed_backstock_ids, vec![2, 5, 9]);
    }
}
