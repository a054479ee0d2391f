// ==========================================
// 球衣号码对账系统 - 领域模型层
// ==========================================
// 职责: 定义表格、订单、名册、报告等领域实体与类型
// 红线: 不含文件读写逻辑,不含引擎逻辑
// ==========================================

pub mod order;
pub mod report;
pub mod roster;
pub mod table;
pub mod types;

// 重导出核心类型
pub use order::OrderRecord;
pub use report::{ReportEntry, REPORT_HEADERS};
pub use roster::RosterEntry;
pub use table::Table;
pub use types::{
    jersey_display_value, AmbiguousMatchPolicy, AssignmentStatus, FinalNumber, CHANGED_MARKER,
    NOT_AVAILABLE,
};
