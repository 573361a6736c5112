// ==========================================
// 备餐排单系统 - 导入层
// ==========================================
// 依据: Order_Engine_Specs_v1.2.md - 4.1 Order Normalizer
// ==========================================
// 职责: 上传数据解析、字段映射、标签清洗、行级校验
// 红线: 行级失败不中断批次；文件级失败整体上报
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod label_cleaner;
pub mod order_normalizer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, UploadRow};
pub use label_cleaner::LabelCleaner;
pub use order_normalizer::{NormalizationResult, OrderNormalizer};
