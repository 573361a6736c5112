// ==========================================
// 备餐排单系统 - 引擎层
// ==========================================
// 依据: Order_Engine_Specs_v1.2.md - 2. 系统总览
// ==========================================
// 职责: 聚合 / 分配 / 换算 / 装配,纯计算无 I/O
// 红线: 数据流严格单向,下游不回调上游
// ==========================================

pub mod aggregator;
pub mod allocator;
pub mod converter;
pub mod error;
pub mod finalizer;
pub mod orchestrator;

// 重导出核心引擎
pub use aggregator::{AggregationResult, IngredientAggregator};
pub use allocator::{Allocation, AllocationLedger, BackstockAllocator};
pub use converter::UnitConverter;
pub use error::{EngineError, EngineResult};
pub use finalizer::ReportFinalizer;
pub use orchestrator::RunOrchestrator;
