// ==========================================
// 球衣号码对账系统 - 名册领域模型
// ==========================================
// 标识: 名册行以原始行号唯一定位
// 说明: 号码字段不在此快照中，始终从名册表实时读取
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// RosterEntry - 名册行快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub row_index: usize,    // 名册数据行号（0 起）
    pub first_name: String,  // 原始名（展示用）
    pub last_name: String,   // 原始姓（展示用）
    pub team: String,        // 球队
    pub match_first: String, // 匹配键: 小写 + 去空白
    pub match_last: String,
}

impl RosterEntry {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
