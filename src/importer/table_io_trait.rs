// ==========================================
// 球衣号码对账系统 - 表格读写 Trait
// ==========================================
// 职责: 定义文件 ↔ Table 的读写接口（不包含实现）
// ==========================================

use crate::domain::table::Table;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为 Table
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(Table): 表头 + 数据行（已 TRIM，空白行已跳过）
    /// - Err: 文件不存在、格式错误
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<Table>;
}

// ==========================================
// TableWriter Trait
// ==========================================
// 用途: Table 序列化接口（写盘由 OutputStager 统一完成）
// 实现者: CsvWriter
pub trait TableWriter: Send + Sync {
    /// 将 Table 序列化为字节
    fn serialize_table(&self, table: &Table) -> ImportResult<Vec<u8>>;
}
