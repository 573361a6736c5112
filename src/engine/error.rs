// ==========================================
// 备餐排单系统 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 结构性错误整次运行终止,行级问题不走此通道
// ==========================================

use thiserror::Error;

/// 引擎结构性错误（调用方契约违约）
///
/// 行级校验问题以 OrderError 列表随报表返回,运行照常完成；
/// 此处只承载参照数据与订单数据脱节类的硬失败。
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("订单集合为空,无可聚合数据")]
    EmptyOrderSet,

    #[error("蛋白信息表缺少代码: {code}（参照数据与订单数据脱节）")]
    UnknownProtein { code: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// 引擎 Result 别名
pub type EngineResult<T> = Result<T, EngineError>;
