// ==========================================
// 球衣号码对账系统 - 审计报告模型
// ==========================================
// 决策记录与重号记录共用同一结构（统一 display_name）
// 顺序: 全部决策记录在前，终检重号记录在后
// ==========================================

use crate::domain::types::AssignmentStatus;
use serde::{Deserialize, Serialize};

/// 报告表头（与 ReportEntry::to_row 顺序一致）
pub const REPORT_HEADERS: [&str; 6] = ["Player", "Team", "Ordered", "Final", "Status", "Reason"];

// ==========================================
// ReportEntry - 报告行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub display_name: String,
    pub team: String,
    pub ordered: String, // 订单号码；CONFLICT 行为 "N/A"
    pub final_value: String,
    pub status: AssignmentStatus,
    pub reason: String,
}

impl ReportEntry {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.display_name.clone(),
            self.team.clone(),
            self.ordered.clone(),
            self.final_value.clone(),
            self.status.to_string(),
            self.reason.clone(),
        ]
    }
}
