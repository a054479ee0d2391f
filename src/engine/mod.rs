// ==========================================
// 球衣号码对账系统 - 引擎层
// ==========================================
// 职责: 号码对账核心规则（匹配、冲突判定、改号、重号终检）
// 红线: 引擎不做文件 I/O, 所有决策必须输出 reason
// ==========================================

pub mod assignment_resolver;
pub mod duplicate_auditor;
pub mod orchestrator;
pub mod report_builder;
pub mod roster_index;

// 重导出核心引擎
pub use assignment_resolver::{AssignmentResolver, Decision};
pub use duplicate_auditor::{DuplicateAuditor, DuplicateConflict};
pub use orchestrator::{resolve, ReconcileOrchestrator, ReconcileOutcome};
pub use report_builder::{report_table, ReportBuilder, StatusCounts};
pub use roster_index::{parse_jersey, RosterIndex};
