// ==========================================
// 球衣号码对账系统 - API 层
// ==========================================
// 职责: 对外业务接口（文件 → 对账 → 文件）
// ==========================================

pub mod error;
pub mod reconcile_api;

pub use error::{ApiError, ApiResult};
pub use reconcile_api::{OutputPaths, ReconcileApi, RunSummary};
