// ==========================================
// 备餐排单系统 - 冻库备货实体
// ==========================================
// 依据: Order_Engine_Specs_v1.2.md - 3. 数据模型
// 红线: 引擎只读快照,消耗结果以 id 列表回报,不改写行
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// BackstockRow - 冻库备货行
// ==========================================

/// 一份已制备的冻库存货
///
/// 所有权归外部存储层；引擎在单次运行开始时读取一份快照,
/// 运行结束回报被消耗的 id 集合,由调用方落库置为不可用。
/// 不变量: 同一 id 在一次运行内至多被回报消耗一次。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackstockRow {
    /// 备货行 id（唯一且稳定）
    pub id: i64,

    /// 蛋白代码
    pub protein_code: String,

    /// 口味代码（非口味化库存类目为 None,如部分蔬菜）
    pub flavor_code: Option<String>,

    /// 净重（盎司,固定且 > 0,业务精度为 0.1oz——
    /// 分配引擎的离散化回退路径依赖此精度无损）
    pub weight_oz: f64,

    /// 可用标志
    pub available: bool,

    /// 入库时间
    pub created_at: DateTime<Utc>,
}

impl BackstockRow {
    /// 是否可参与指定 (蛋白, 口味) 需求的分配
    ///
    /// # 参数
    /// - protein_code: 需求蛋白代码
    /// - flavor_code: 口味过滤器；None 表示该类目不按口味匹配
    pub fn matches(&self, protein_code: &str, flavor_code: Option<&str>) -> bool {
        if !self.available || self.protein_code != protein_code {
            return false;
        }
        match flavor_code {
            Some(flavor) => self.flavor_code.as_deref() == Some(flavor),
            None => true,
        }
    }
}
