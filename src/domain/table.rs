// ==========================================
// 球衣号码对账系统 - 表格模型
// ==========================================
// 职责: 文件读写层与引擎之间的统一内存表
// 约定: 行序/列序与输入一致；缺失值为空字符串
// ==========================================

/// 有序字符串表（表头 + 行）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// 由表头和行构建，行宽按表头补齐/截断
    pub fn with_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self::new(headers);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// 按列名查找列下标（精确匹配）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// 读取单元格；越界返回空串
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// 写入单元格；越界写入被忽略并返回 false
    pub fn set_cell(&mut self, row: usize, col: usize, value: impl Into<String>) -> bool {
        match self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = value.into();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::with_rows(
            vec!["A".to_string(), "B".to_string()],
            vec![
                vec!["1".to_string()],
                vec!["2".to_string(), "x".to_string(), "extra".to_string()],
            ],
        )
    }

    #[test]
    fn test_rows_are_padded_and_truncated() {
        let table = sample();
        assert_eq!(table.rows()[0], vec!["1".to_string(), String::new()]);
        assert_eq!(table.rows()[1].len(), 2);
    }

    #[test]
    fn test_cell_access() {
        let mut table = sample();
        assert_eq!(table.column_index("B"), Some(1));
        assert_eq!(table.column_index("b"), None);
        assert_eq!(table.cell(1, 1), "x");
        assert_eq!(table.cell(9, 9), "");

        assert!(table.set_cell(0, 1, "y"));
        assert_eq!(table.cell(0, 1), "y");
        assert!(!table.set_cell(5, 0, "z"));
    }
}
