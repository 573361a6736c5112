// ==========================================
// 备餐排单系统 - 冻库备货分配引擎
// ==========================================
// 依据: Order_Engine_Specs_v1.2.md - 4.3 Backstock Allocator
// ==========================================
// 职责: 在重量约束下选出权重最大的可行备货子集
// 红线: 总重不得超过需求；同一备货 id 单次运行至多消耗一次
// 红线: 随机源显式注入,不使用环境全局随机
// ==========================================

use crate::config::EngineConfig;
use crate::domain::backstock::BackstockRow;
use rand::Rng;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// 重量比较容差（盎司值精度为一位小数,1e-6 足够区分）
const WEIGHT_EPS: f64 = 1e-6;

/// 离散化刻度（DP 回退路径,十分之一盎司一档）
const WEIGHT_SCALE: f64 = 10.0;

// ==========================================
// AllocationLedger - 消耗台账
// ==========================================

/// 单次运行内的备货消耗台账
///
/// 显式值传递,逐键折叠；取代外部可变集合穿透调用的写法,
/// 保证同一 id 不会被两个 (蛋白,口味) 键重复认领。
#[derive(Debug, Clone, Default)]
pub struct AllocationLedger {
    consumed: HashSet<i64>,
}

impl AllocationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_consumed(&self, id: i64) -> bool {
        self.consumed.contains(&id)
    }

    /// 登记消耗；同 id 二次登记返回 false
    pub fn mark_consumed(&mut self, id: i64) -> bool {
        self.consumed.insert(id)
    }

    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }

    /// 升序导出消耗 id（交调用方落库置不可用）
    pub fn consumed_ids_sorted(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.consumed.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

// ==========================================
// Allocation - 单键分配结果
// ==========================================

/// 一个 (蛋白, 口味) 键的分配结果
#[derive(Debug, Clone)]
pub struct Allocation {
    /// 被选中的备货行
    pub rows: Vec<BackstockRow>,

    /// 选中行总净重（盎司,<= 需求）
    pub total_oz: f64,
}

// ==========================================
// BackstockAllocator - 分配引擎
// ==========================================
pub struct BackstockAllocator {
    exact_subset_cap: usize,
}

impl BackstockAllocator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            exact_subset_cap: config.exact_subset_cap,
        }
    }

    /// 为单个 (蛋白, 口味, 需求重量) 三元组选择消耗子集
    ///
    /// # 规则（Order_Engine_Specs 4.3）
    /// 1) 过滤: 可用 + 未消耗 + 蛋白匹配 + 口味匹配（过滤器为 None 时不按口味）
    ///    + 单行净重 <= 需求；过滤后为空 → 无分配
    /// 2) 枚举全部非空子集,弃去超重者
    /// 3) 取可行子集中总重最大者；并列时均匀随机取一
    /// 4) 选中行立即登记台账,后续键不可再认领
    ///
    /// 行数超过 exact_subset_cap 时退化为离散化子集和 DP（见 solve_dp）。
    #[instrument(skip_all, fields(protein = protein_code, flavor = flavor_code, required_oz))]
    pub fn allocate<R: Rng>(
        &self,
        pool: &[BackstockRow],
        protein_code: &str,
        flavor_code: Option<&str>,
        required_oz: f64,
        ledger: &mut AllocationLedger,
        rng: &mut R,
    ) -> Option<Allocation> {
        if required_oz <= 0.0 {
            return None;
        }

        // 1. 过滤快照
        let candidates: Vec<&BackstockRow> = pool
            .iter()
            .filter(|row| {
                row.matches(protein_code, flavor_code)
                    && !ledger.is_consumed(row.id)
                    && row.weight_oz <= required_oz + WEIGHT_EPS
            })
            .collect();

        if candidates.is_empty() {
            return None;
        }

        // 2-3. 子集求解
        let solved = if candidates.len() <= self.exact_subset_cap {
            Self::solve_exact(&candidates, required_oz, rng)
        } else {
            warn!(
                candidates = candidates.len(),
                cap = self.exact_subset_cap,
                "候选备货行数超过精确枚举上限,退化为离散化 DP"
            );
            Self::solve_dp(&candidates, required_oz)
        };
        let chosen = solved?;

        // 4. 登记台账
        let mut rows = Vec::with_capacity(chosen.len());
        let mut total_oz = 0.0;
        for row in chosen {
            // 候选集已排除台账内 id,此处登记必然成功
            ledger.mark_consumed(row.id);
            total_oz += row.weight_oz;
            rows.push(row.clone());
        }

        debug!(rows = rows.len(), total_oz, "备货分配完成");
        Some(Allocation { rows, total_oz })
    }

    /// 精确路径: 位掩码枚举全部 2^n - 1 个非空子集
    ///
    /// 总重最大值可能由多个不同子集并列达成（两份等重单行、
    /// 双行组合追平三行组合等）,并列子集中均匀随机取一。
    /// 随机只影响取哪些物理批次,不影响总重,聚合数字保持确定。
    fn solve_exact<'a, R: Rng>(
        candidates: &[&'a BackstockRow],
        required_oz: f64,
        rng: &mut R,
    ) -> Option<Vec<&'a BackstockRow>> {
        let n = candidates.len();
        let subset_count = 1usize << n;

        // totals[mask] 由去掉最低位的子集增量递推
        let mut totals = vec![0.0f64; subset_count];
        let mut best_total = f64::NEG_INFINITY;
        let mut best_masks: Vec<usize> = Vec::new();

        for mask in 1..subset_count {
            let lowest = mask.trailing_zeros() as usize;
            let total = totals[mask & (mask - 1)] + candidates[lowest].weight_oz;
            totals[mask] = total;

            if total > required_oz + WEIGHT_EPS {
                continue;
            }
            if total > best_total + WEIGHT_EPS {
                best_total = total;
                best_masks.clear();
                best_masks.push(mask);
            } else if (total - best_total).abs() <= WEIGHT_EPS {
                best_masks.push(mask);
            }
        }

        if best_masks.is_empty() {
            return None;
        }

        let mask = best_masks[rng.random_range(0..best_masks.len())];
        Some(
            (0..n)
                .filter(|bit| mask & (1 << bit) != 0)
                .map(|bit| candidates[bit])
                .collect(),
        )
    }

    /// 回退路径: 离散化子集和 DP（十分之一盎司一档）
    ///
    /// 备货净重的业务精度为一位小数,离散化无损；
    /// 只重构一个最优子集,不做并列随机（近似策略,开放问题）。
    fn solve_dp<'a>(
        candidates: &[&'a BackstockRow],
        required_oz: f64,
    ) -> Option<Vec<&'a BackstockRow>> {
        let capacity = (required_oz * WEIGHT_SCALE + WEIGHT_EPS).floor() as usize;
        if capacity == 0 {
            return None;
        }

        // parent[s] = (行下标, 前驱和): s 首次可达时的转移来源
        let mut parent: Vec<Option<(usize, usize)>> = vec![None; capacity + 1];
        let mut reachable = vec![false; capacity + 1];
        reachable[0] = true;

        for (idx, row) in candidates.iter().enumerate() {
            let weight = (row.weight_oz * WEIGHT_SCALE).round() as usize;
            // 备货净重契约精度 0.1oz；更细的重量在离散化时会失真,
            // 重构子集的真实总重可能超出需求
            debug_assert!(
                (row.weight_oz * WEIGHT_SCALE - weight as f64).abs() < WEIGHT_EPS,
                "备货行 {} 净重 {} 超出 0.1oz 精度契约",
                row.id,
                row.weight_oz
            );
            if weight == 0 || weight > capacity {
                continue;
            }
            for sum in (weight..=capacity).rev() {
                if reachable[sum - weight] && !reachable[sum] {
                    reachable[sum] = true;
                    parent[sum] = Some((idx, sum - weight));
                }
            }
        }

        let best = (1..=capacity).rev().find(|&sum| reachable[sum])?;

        let mut chosen = Vec::new();
        let mut cursor = best;
        while let Some((idx, prev)) = parent[cursor] {
            chosen.push(candidates[idx]);
            cursor = prev;
            if cursor == 0 {
                break;
            }
        }
        Some(chosen)
    }
}
