// ==========================================
// 球衣号码对账系统 - 审计报告构建器
// ==========================================
// 职责: 累积决策记录与重号记录，输出有序报告
// 顺序: 决策记录全部在前（按订单顺序），重号记录在后
// ==========================================

use crate::domain::report::{ReportEntry, REPORT_HEADERS};
use crate::domain::table::Table;
use crate::domain::types::{AssignmentStatus, NOT_AVAILABLE};
use crate::engine::assignment_resolver::Decision;
use crate::engine::duplicate_auditor::DuplicateConflict;
use serde::{Deserialize, Serialize};

// ==========================================
// StatusCounts - 报告汇总
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub kept: usize,
    pub changed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub conflicts: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: AssignmentStatus) {
        match status {
            AssignmentStatus::Kept => self.kept += 1,
            AssignmentStatus::Changed => self.changed += 1,
            AssignmentStatus::Skipped => self.skipped += 1,
            AssignmentStatus::Error => self.errors += 1,
            AssignmentStatus::Conflict => self.conflicts += 1,
        }
    }

    /// 决策总数（不含重号记录）
    pub fn decisions(&self) -> usize {
        self.kept + self.changed + self.skipped + self.errors
    }
}

#[derive(Debug, Default)]
pub struct ReportBuilder {
    decisions: Vec<ReportEntry>,
    conflicts: Vec<ReportEntry>,
    counts: StatusCounts,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_decision(&mut self, decision: &Decision) {
        self.counts.record(decision.status);
        self.decisions.push(ReportEntry {
            display_name: decision.display_name.clone(),
            team: decision
                .team
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            ordered: decision.ordered.map(|n| n.to_string()).unwrap_or_default(),
            final_value: decision.final_number.to_string(),
            status: decision.status,
            reason: decision.reason.clone(),
        });
    }

    pub fn record_conflict(&mut self, conflict: &DuplicateConflict) {
        self.counts.record(AssignmentStatus::Conflict);
        self.conflicts.push(ReportEntry {
            display_name: conflict.display_name.clone(),
            team: conflict.team.clone(),
            ordered: NOT_AVAILABLE.to_string(),
            final_value: conflict.jersey.clone(),
            status: AssignmentStatus::Conflict,
            reason: conflict.reason(),
        });
    }

    pub fn counts(&self) -> StatusCounts {
        self.counts
    }

    pub fn len(&self) -> usize {
        self.decisions.len() + self.conflicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 有序报告（决策在前，重号在后）
    pub fn into_entries(self) -> Vec<ReportEntry> {
        let mut entries = self.decisions;
        entries.extend(self.conflicts);
        entries
    }
}

/// 报告行 → 报告表
pub fn report_table(entries: &[ReportEntry]) -> Table {
    Table::with_rows(
        REPORT_HEADERS.iter().map(|h| h.to_string()).collect(),
        entries.iter().map(ReportEntry::to_row).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::FinalNumber;

    fn decision(status: AssignmentStatus, final_number: FinalNumber) -> Decision {
        Decision {
            order_row: 0,
            roster_row: Some(0),
            display_name: "Ann Lee".to_string(),
            team: Some("Sharks".to_string()),
            ordered: Some(7),
            final_number,
            status,
            reason: "r".to_string(),
        }
    }

    fn conflict() -> DuplicateConflict {
        DuplicateConflict {
            roster_row: 1,
            display_name: "Bo Kim".to_string(),
            team: "Sharks".to_string(),
            jersey: "CHANGED: 9".to_string(),
            number: 9,
        }
    }

    #[test]
    fn test_decisions_precede_conflicts() {
        let mut builder = ReportBuilder::new();
        builder.record_conflict(&conflict());
        builder.record_decision(&decision(AssignmentStatus::Kept, FinalNumber::Number(7)));

        let entries = builder.into_entries();
        assert_eq!(entries[0].status, AssignmentStatus::Kept);
        assert_eq!(entries[1].status, AssignmentStatus::Conflict);
        assert_eq!(entries[1].ordered, "N/A");
        assert_eq!(entries[1].final_value, "CHANGED: 9");
    }

    #[test]
    fn test_error_row_shape() {
        let mut builder = ReportBuilder::new();
        let mut d = decision(AssignmentStatus::Error, FinalNumber::NotAvailable);
        d.team = None;
        d.ordered = None;
        builder.record_decision(&d);

        let entry = &builder.into_entries()[0];
        assert_eq!(entry.team, "N/A");
        assert_eq!(entry.final_value, "N/A");
        assert_eq!(entry.ordered, "");
    }

    #[test]
    fn test_counts_and_table() {
        let mut builder = ReportBuilder::new();
        builder.record_decision(&decision(AssignmentStatus::Kept, FinalNumber::Number(7)));
        builder.record_decision(&decision(AssignmentStatus::Skipped, FinalNumber::Absent));
        builder.record_conflict(&conflict());

        let counts = builder.counts();
        assert_eq!(counts.kept, 1);
        assert_eq!(counts.skipped, 1);
        assert_eq!(counts.conflicts, 1);
        assert_eq!(counts.decisions(), 2);

        let table = report_table(&builder.into_entries());
        assert_eq!(table.headers()[0], "Player");
        assert_eq!(table.len(), 3);
        assert_eq!(table.cell(1, 3), "");
        assert_eq!(table.cell(2, 4), "CONFLICT");
    }
}
