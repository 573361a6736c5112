// ==========================================
// 备餐排单系统 - 引擎参数配置
// ==========================================
// 依据: Order_Engine_Specs_v1.2.md - 11. 配置项全集
// ==========================================

use serde::{Deserialize, Serialize};

/// 引擎可调参数（带默认值,可由外部配置覆写）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 答谢袋分块（每客户每满 N 餐一袋）
    #[serde(default = "default_thank_you_bag_block")]
    pub thank_you_bag_block: u32,

    /// 红薯分配松弛量（盎司）
    ///
    /// 业务容忍至多 5oz 的用后剩余,换取不必新开整份零售装。
    #[serde(default = "default_yam_slack_oz")]
    pub yam_slack_oz: f64,

    /// 精确子集枚举的行数上限
    ///
    /// 子集枚举为 2^n - 1,超过上限退化为离散化子集和 DP。
    /// 上限取值属开放问题,当前按单键备货批次数的经验上界设定。
    #[serde(default = "default_exact_subset_cap")]
    pub exact_subset_cap: usize,
}

fn default_thank_you_bag_block() -> u32 {
    14
}

fn default_yam_slack_oz() -> f64 {
    5.0
}

fn default_exact_subset_cap() -> usize {
    20
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thank_you_bag_block: default_thank_you_bag_block(),
            yam_slack_oz: default_yam_slack_oz(),
            exact_subset_cap: default_exact_subset_cap(),
        }
    }
}
