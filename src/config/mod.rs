// ==========================================
// 备餐排单系统 - 配置层
// ==========================================
// 依据: Order_Engine_Specs_v1.2.md - 11. 配置项全集
// ==========================================
// 职责: 引擎参数 + 参照表（表头/口味/蛋白）
// 红线: 配置与参照数据由调用方提供,引擎不做 I/O
// ==========================================

pub mod engine_config;
pub mod reference;

pub use engine_config::EngineConfig;
pub use reference::{
    canonical_fields, FlavorEntry, FlavorMap, HeaderMap, ProteinInfo, ProteinTable,
    ReferenceTables,
};
