// ==========================================
// 球衣号码对账系统 - 名册索引
// ==========================================
// 职责: 按 (名, 姓) 匹配键与按球队建立查找结构
// 契约: 名册表由索引独占持有；号码字段始终实时读取，
//       先前决策写入的号码对后续冲突检查可见
// ==========================================

use crate::domain::roster::RosterEntry;
use crate::domain::table::Table;
use crate::domain::types::CHANGED_MARKER;
use crate::importer::column_map::RosterColumns;
use crate::importer::data_cleaner::NameNormalizer;
use std::collections::{BTreeSet, HashMap};

/// 号码字段的数值解析（尽力而为）
///
/// # 规则
/// - "7" / " 7 " → 7
/// - "7.0"（表格导出的整数浮点）→ 7
/// - "CHANGED: 7"（本系统写回的改号标记）→ 7
/// - 其他（空串、"N/A"、"CHANGED: N/A"、"7.5"、负数）→ None
pub fn parse_jersey(raw: &str) -> Option<u32> {
    let mut value = raw.trim();
    if let Some(rest) = value.strip_prefix(CHANGED_MARKER) {
        value = rest.trim();
    }
    if value.is_empty() {
        return None;
    }

    if let Ok(n) = value.parse::<u32>() {
        return Some(n);
    }

    let f = value.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 {
        Some(f as u32)
    } else {
        None
    }
}

// ==========================================
// RosterIndex - 名册索引 + 可变名册存储
// ==========================================
pub struct RosterIndex {
    table: Table,
    columns: RosterColumns,
    entries: Vec<RosterEntry>,
    by_name: HashMap<(String, String), Vec<usize>>,
    by_team: HashMap<String, Vec<usize>>,
}

impl RosterIndex {
    /// 基于完整名册构建索引（单次运行只构建一次）
    ///
    /// 名或姓匹配键为空的行不参与姓名查找，但仍计入球队已占号码
    pub fn build(table: Table, columns: RosterColumns) -> Self {
        let mut entries = Vec::with_capacity(table.len());
        let mut by_name: HashMap<(String, String), Vec<usize>> = HashMap::new();
        let mut by_team: HashMap<String, Vec<usize>> = HashMap::new();

        for row_index in 0..table.len() {
            let first_name = table.cell(row_index, columns.first_name).to_string();
            let last_name = table.cell(row_index, columns.last_name).to_string();
            let entry = RosterEntry {
                row_index,
                match_first: NameNormalizer::match_key(&first_name),
                match_last: NameNormalizer::match_key(&last_name),
                first_name,
                last_name,
                team: table.cell(row_index, columns.team_name).trim().to_string(),
            };

            if !entry.match_first.is_empty() && !entry.match_last.is_empty() {
                by_name
                    .entry((entry.match_first.clone(), entry.match_last.clone()))
                    .or_default()
                    .push(row_index);
            }
            by_team.entry(entry.team.clone()).or_default().push(row_index);
            entries.push(entry);
        }

        Self {
            table,
            columns,
            entries,
            by_name,
            by_team,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn entry(&self, row_index: usize) -> Option<&RosterEntry> {
        self.entries.get(row_index)
    }

    /// 按匹配键查找球员：返回输入顺序中的第一行
    pub fn find_player(&self, match_first: &str, match_last: &str) -> Option<usize> {
        self.matches(match_first, match_last).first().copied()
    }

    /// 按匹配键查找全部同名行（输入顺序）
    pub fn matches(&self, match_first: &str, match_last: &str) -> &[usize] {
        self.by_name
            .get(&(match_first.to_string(), match_last.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 球队所有行（输入顺序）
    pub fn team_rows(&self, team: &str) -> &[usize] {
        self.by_team.get(team).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 当前号码原文
    pub fn jersey(&self, row_index: usize) -> &str {
        self.table.cell(row_index, self.columns.jersey)
    }

    /// 球队已占号码（排除指定行），每次调用按当前名册状态重新计算
    pub fn taken_numbers(&self, team: &str, excluding: usize) -> BTreeSet<u32> {
        self.team_rows(team)
            .iter()
            .filter(|&&row| row != excluding)
            .filter_map(|&row| parse_jersey(self.jersey(row)))
            .collect()
    }

    /// 写入号码字段（立即对后续 taken_numbers 可见）
    pub fn assign_jersey(&mut self, row_index: usize, value: impl Into<String>) -> bool {
        self.table.set_cell(row_index, self.columns.jersey, value)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// 交还名册表（运行结束）
    pub fn into_table(self) -> Table {
        self.table
    }
}
