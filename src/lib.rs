// ==========================================
// 备餐排单系统 - 核心库
// ==========================================
// 系统定位: 订单聚合与冻库备货分配引擎（纯计算,决策支持核心）
// 外围 CRUD/UI（表单、路由、鉴权、PDF 排版、落库）为外部协作方,
// 以内存结构调用本库并处置其输出。
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 引擎参数与参照表
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::ContainerSize;

// 领域实体
pub use domain::{
    BackstockRow, IngredientRequirement, Meal, Order, OrderError, OrderReport, OrderStatistics,
    RawOrderRecord,
};

// 引擎
pub use engine::{
    Allocation, AllocationLedger, BackstockAllocator, EngineError, IngredientAggregator,
    ReportFinalizer, RunOrchestrator, UnitConverter,
};

// 导入
pub use importer::{CsvParser, ImportError, OrderNormalizer, UploadRow};

// 配置
pub use config::{
    EngineConfig, FlavorEntry, FlavorMap, HeaderMap, ProteinInfo, ProteinTable, ReferenceTables,
};
