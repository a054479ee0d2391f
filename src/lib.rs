// ==========================================
// 球衣号码对账系统 - 核心库
// ==========================================
// 职责: 订单表号码 ↔ 球队名册号码对账
// 产物: 更新后订单表 + 更新后名册 + 处理报告
// 边界: 纯文件批处理，无数据库、无网络
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 表格/订单/名册/报告类型
pub mod domain;

// 导入层 - 表格读写与字段提取
pub mod importer;

// 引擎层 - 号码决策与重号终检
pub mod engine;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 文件 → 对账 → 文件
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    AmbiguousMatchPolicy, AssignmentStatus, FinalNumber, OrderRecord, ReportEntry, RosterEntry,
    Table,
};

pub use engine::{
    resolve, AssignmentResolver, DuplicateAuditor, ReconcileOrchestrator, ReconcileOutcome,
    RosterIndex,
};

pub use config::{ConfigManager, NumberPool, ReconcileConfig, RunConfig};

pub use api::{ApiError, ReconcileApi, RunSummary};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "jersey-reconcile";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
