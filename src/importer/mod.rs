// ==========================================
// 球衣号码对账系统 - 导入层
// ==========================================
// 职责: 外部表格读写 + 订单/姓名字段派生
// 支持: Excel, CSV（输出一律 CSV）
// ==========================================

// 模块声明
pub mod column_map;
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod file_writer;
pub mod table_io_trait;

// 重导出核心类型
pub use column_map::{RosterColumns, VendorColumns};
pub use data_cleaner::NameNormalizer;
pub use error::{ImportError, ImportResult};
pub use field_mapper::OrderExtractor;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use file_writer::{CsvWriter, OutputStager};

// 重导出 Trait 接口
pub use table_io_trait::{FileParser, TableWriter};
