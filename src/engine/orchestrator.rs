// ==========================================
// 备餐排单系统 - 引擎编排器
// ==========================================
// 依据: Order_Engine_Specs_v1.2.md - 2. 计算主流程
// 用途: 标准化 → 聚合 → 分配 → 换算 → 装配,单遍同步执行
// ==========================================
// 已知一致性缺口: 快照读取与"置不可用"落库在外围系统中
// 不在同一事务内,两次并发运行可能重复分配同一备货行。
// 此为源业务既有行为,在此明示,不在引擎内修复。
// ==========================================

use crate::config::{EngineConfig, ReferenceTables};
use crate::domain::backstock::BackstockRow;
use crate::domain::meal::Meal;
use crate::domain::stats::OrderReport;
use crate::domain::types::{CHICKEN_CODE, CHICKEN_REUSE_FLAVORS, PLAIN_FLAVOR_CODE, YAMS_CODE};
use crate::engine::aggregator::IngredientAggregator;
use crate::engine::allocator::{AllocationLedger, BackstockAllocator};
use crate::engine::converter::UnitConverter;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::finalizer::ReportFinalizer;
use crate::importer::file_parser::UploadRow;
use crate::importer::order_normalizer::OrderNormalizer;
use rand::Rng;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// RunOrchestrator - 引擎编排器
// ==========================================

pub struct RunOrchestrator {
    config: EngineConfig,
    allocator: BackstockAllocator,
}

impl RunOrchestrator {
    /// 创建新的编排器实例
    pub fn new(config: EngineConfig) -> Self {
        let allocator = BackstockAllocator::new(&config);
        Self { config, allocator }
    }

    /// 执行完整运行（单次上传一遍,无内部挂起点）
    ///
    /// # 参数
    /// - raw_rows: 已解析的上传行（携带文件内行号）
    /// - tables: 表头映射 / 口味映射 / 蛋白信息表
    /// - backstock: 冻库备货快照（只读,消耗以 id 回报）
    /// - rng: 随机源（分配平局裁决,测试注入种子）
    ///
    /// # 错误
    /// - EmptyOrderSet: 上传行为空,或整批无一行通过校验
    /// - UnknownProtein: 订单引用的蛋白不在蛋白信息表
    #[instrument(skip_all, fields(rows = raw_rows.len(), backstock_rows = backstock.len()))]
    pub fn run<R: Rng>(
        &self,
        raw_rows: &[UploadRow],
        tables: &ReferenceTables,
        backstock: &[BackstockRow],
        rng: &mut R,
    ) -> EngineResult<OrderReport> {
        let run_id = Uuid::new_v4();
        info!(%run_id, "运行开始");

        if raw_rows.is_empty() {
            warn!("上传行集合为空,终止运行");
            return Err(EngineError::EmptyOrderSet);
        }

        // 1. 标准化（行级失败不中断,错误随报表返回）
        let normalization =
            OrderNormalizer::normalize(raw_rows, &tables.header_map, &tables.flavor_map);
        if !normalization.errors.is_empty() {
            info!(rejected = normalization.errors.len(), "存在被拒绝的上传行");
        }

        // 2. 聚合
        let aggregation = IngredientAggregator::aggregate(&normalization.orders, &self.config)?;

        // 3. 主分配遍（键序遍历,台账顺序折叠保证 id 不重复认领）
        let mut ledger = AllocationLedger::new();
        let mut meals: Vec<Meal> = Vec::new();

        for (protein_code, flavors) in &aggregation.requirements {
            let info = tables.protein_table.get(protein_code).ok_or_else(|| {
                warn!(protein = %protein_code, "蛋白信息表缺失代码,终止运行");
                EngineError::UnknownProtein {
                    code: protein_code.clone(),
                }
            })?;

            for (flavor_code, requirement) in flavors {
                // 红薯键允许至多 yam_slack_oz 的超额分配,
                // 换取不必新开整份零售装
                let slack = if protein_code == YAMS_CODE {
                    self.config.yam_slack_oz
                } else {
                    0.0
                };
                // 非口味化类目（flavor_keyed = false）按蛋白整体匹配
                let flavor_filter = info.flavor_keyed.then_some(flavor_code.as_str());

                let allocation = self.allocator.allocate(
                    backstock,
                    protein_code,
                    flavor_filter,
                    requirement.weight_oz + slack,
                    &mut ledger,
                    rng,
                );
                let backstock_weight_oz =
                    allocation.as_ref().map_or(0.0, |a| a.total_oz);

                meals.push(Meal {
                    protein_code: protein_code.clone(),
                    flavor_code: flavor_code.clone(),
                    protein_label: requirement.protein_label.clone(),
                    flavor_label: requirement.flavor_label.clone(),
                    original_weight_oz: requirement.weight_oz,
                    // 松弛分配可略超需求,待烹重量下限为零
                    final_weight_oz: (requirement.weight_oz - backstock_weight_oz).max(0.0),
                    backstock_weight_oz,
                    cooked_weight_oz: 0.0,
                    display_weight: String::new(),
                });
            }
        }

        // 4. 鸡肉跨口味复用遍: 原味备货可在主遍之后补给
        //    sriracha/bbq/teriyaki 三个成品口味,仅限未消耗批次,
        //    且目标口味仍有待烹重量时才触发
        for meal in meals
            .iter_mut()
            .filter(|m| m.protein_code == CHICKEN_CODE)
            .filter(|m| CHICKEN_REUSE_FLAVORS.contains(&m.flavor_code.as_str()))
            .filter(|m| m.final_weight_oz > 0.0)
        {
            if let Some(reuse) = self.allocator.allocate(
                backstock,
                CHICKEN_CODE,
                Some(PLAIN_FLAVOR_CODE),
                meal.final_weight_oz,
                &mut ledger,
                rng,
            ) {
                debug!(
                    flavor = %meal.flavor_code,
                    reused_oz = reuse.total_oz,
                    "原味鸡肉备货跨口味复用"
                );
                meal.backstock_weight_oz += reuse.total_oz;
                meal.final_weight_oz = (meal.final_weight_oz - reuse.total_oz).max(0.0);
            }
        }

        // 5. 缩水换算 + 显示串
        for meal in &mut meals {
            // 步骤 3 已验证全部蛋白代码在表内
            let shrink_pct = tables
                .protein_table
                .get(&meal.protein_code)
                .map(|info| info.shrink_pct)
                .unwrap_or_default();
            meal.cooked_weight_oz =
                UnitConverter::cooked_weight_oz(meal.final_weight_oz, shrink_pct);
            meal.display_weight = UnitConverter::format_lbs_oz(meal.cooked_weight_oz);
        }

        // 6. 装配报表
        let report = ReportFinalizer::finalize(
            run_id,
            aggregation.statistics,
            meals,
            normalization.errors,
            ledger.consumed_ids_sorted(),
        );

        info!(
            meals = report.meals.len(),
            consumed = report.consumed_backstock_ids.len(),
            errors = report.errors.len(),
            "运行完成"
        );
        Ok(report)
    }
}
