// ==========================================
// 备餐排单系统 - 领域模型层
// ==========================================
// 依据: Order_Engine_Specs_v1.2.md - 3. 数据模型
// ==========================================
// 职责: 定义领域实体、类型、业务常量
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod backstock;
pub mod meal;
pub mod order;
pub mod stats;
pub mod types;

// 重导出核心类型
pub use backstock::BackstockRow;
pub use meal::{IngredientRequirement, Meal};
pub use order::{Order, OrderError, RawOrderRecord};
pub use stats::{OrderReport, OrderStatistics};
pub use types::{
    ContainerSize, CHICKEN_CODE, CHICKEN_REUSE_FLAVORS, OUNCES_PER_POUND, PLAIN_FLAVOR_CODE,
    YAMS_CODE,
};
