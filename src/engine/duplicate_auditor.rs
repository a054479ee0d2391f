// ==========================================
// 球衣号码对账系统 - 重号终检
// ==========================================
// 职责: 全部决策写回后，对最终名册按 (球队, 号码) 分组查重
// 说明: 与逐单冲突检查相互独立；可发现同批两次抽中同号、
//       以及未被任何订单触及的名册原有重号
// 规则: 仅数值号码参与分组，"N/A" 等非数值永不构成冲突
// ==========================================

use crate::engine::roster_index::{parse_jersey, RosterIndex};
use crate::importer::data_cleaner::NameNormalizer;
use std::collections::HashMap;
use tracing::{debug, warn};

// ==========================================
// DuplicateConflict - 重号记录（每个涉及球员一条）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateConflict {
    pub roster_row: usize,
    pub display_name: String,
    pub team: String,
    pub jersey: String, // 名册中的号码原文
    pub number: u32,
}

impl DuplicateConflict {
    pub fn reason(&self) -> String {
        format!(
            "DUPLICATE FOUND: Number {} is assigned to multiple players on team {}.",
            self.number, self.team
        )
    }
}

pub struct DuplicateAuditor;

impl DuplicateAuditor {
    /// 扫描最终名册
    ///
    /// # 返回
    /// - 分组按首次出现顺序，组内按名册行序
    pub fn audit(&self, index: &RosterIndex) -> Vec<DuplicateConflict> {
        let mut group_order: Vec<(String, u32)> = Vec::new();
        let mut groups: HashMap<(String, u32), Vec<usize>> = HashMap::new();

        for entry in index.entries() {
            let raw = match NameNormalizer::normalize_null(index.jersey(entry.row_index)) {
                Some(v) => v,
                None => continue,
            };
            let number = match parse_jersey(raw) {
                Some(n) => n,
                None => {
                    debug!(row = entry.row_index, jersey = %raw, "非数值号码，跳过查重");
                    continue;
                }
            };

            let key = (entry.team.clone(), number);
            let members = groups.entry(key.clone()).or_default();
            if members.is_empty() {
                group_order.push(key);
            }
            members.push(entry.row_index);
        }

        let mut conflicts = Vec::new();
        for key in group_order {
            let members = match groups.get(&key) {
                Some(m) if m.len() > 1 => m,
                _ => continue,
            };
            warn!(team = %key.0, number = key.1, players = members.len(), "发现重号");

            for &row in members {
                if let Some(entry) = index.entry(row) {
                    conflicts.push(DuplicateConflict {
                        roster_row: row,
                        display_name: entry.display_name(),
                        team: entry.team.clone(),
                        jersey: index.jersey(row).to_string(),
                        number: key.1,
                    });
                }
            }
        }
        conflicts
    }
}
