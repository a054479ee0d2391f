// ==========================================
// 球衣号码对账系统 - 列映射
// ==========================================
// 职责: 必需列名常量 + 按列名解析列下标
// 规则: 任一必需列缺失 → 整次运行失败（不产出任何文件）
// ==========================================

use crate::domain::table::Table;
use crate::importer::error::{ImportError, ImportResult};

/// 订单表（供应商导出）列名
pub mod vendor {
    pub const TABLE: &str = "vendor";
    pub const PRODUCT_NAME: &str = "Product Name";
    pub const OPTIONS_DETAIL: &str = "Options Detail";
    /// 名（"Player First Name : X"）
    pub const FIRST_NAME: &str = "Additional Info Question 1";
    /// 姓（"Player Last Name : X"）
    pub const LAST_NAME: &str = "Additional Info Question 2";
}

/// 球队名册列名
pub mod roster {
    pub const TABLE: &str = "roster";
    pub const FIRST_NAME: &str = "First Name";
    pub const LAST_NAME: &str = "Last Name";
    pub const TEAM_NAME: &str = "Team Name";
    pub const JERSEY: &str = "Jersey";
}

fn require(table: &Table, table_name: &str, column: &str) -> ImportResult<usize> {
    table
        .column_index(column)
        .ok_or_else(|| ImportError::MissingColumn {
            table: table_name.to_string(),
            column: column.to_string(),
        })
}

// ==========================================
// VendorColumns - 订单表列下标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorColumns {
    pub product_name: usize,
    pub options_detail: usize,
    pub first_name: usize,
    pub last_name: usize,
}

impl VendorColumns {
    pub fn resolve(table: &Table) -> ImportResult<Self> {
        Ok(Self {
            product_name: require(table, vendor::TABLE, vendor::PRODUCT_NAME)?,
            options_detail: require(table, vendor::TABLE, vendor::OPTIONS_DETAIL)?,
            first_name: require(table, vendor::TABLE, vendor::FIRST_NAME)?,
            last_name: require(table, vendor::TABLE, vendor::LAST_NAME)?,
        })
    }
}

// ==========================================
// RosterColumns - 名册列下标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterColumns {
    pub first_name: usize,
    pub last_name: usize,
    pub team_name: usize,
    pub jersey: usize,
}

impl RosterColumns {
    pub fn resolve(table: &Table) -> ImportResult<Self> {
        Ok(Self {
            first_name: require(table, roster::TABLE, roster::FIRST_NAME)?,
            last_name: require(table, roster::TABLE, roster::LAST_NAME)?,
            team_name: require(table, roster::TABLE, roster::TEAM_NAME)?,
            jersey: require(table, roster::TABLE, roster::JERSEY)?,
        })
    }
}
