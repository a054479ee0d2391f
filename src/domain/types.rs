// ==========================================
// 球衣号码对账系统 - 领域类型定义
// ==========================================
// 职责: 决策状态 / 最终号码 / 同名匹配策略
// 红线: 每个决策必须带 reason
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 号码耗尽或无意义时的哨兵值
pub const NOT_AVAILABLE: &str = "N/A";

/// 改号标记前缀（写回订单表和名册）
pub const CHANGED_MARKER: &str = "CHANGED:";

// ==========================================
// 决策状态 (Assignment Status)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与报告一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentStatus {
    Kept,     // 原号可用
    Changed,  // 冲突改号
    Skipped,  // 订单无号码
    Error,    // 名册查无此人
    Conflict, // 终检发现重号
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentStatus::Kept => write!(f, "KEPT"),
            AssignmentStatus::Changed => write!(f, "CHANGED"),
            AssignmentStatus::Skipped => write!(f, "SKIPPED"),
            AssignmentStatus::Error => write!(f, "ERROR"),
            AssignmentStatus::Conflict => write!(f, "CONFLICT"),
        }
    }
}

// ==========================================
// 最终号码 (Final Number)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalNumber {
    Number(u32),  // 确定号码
    NotAvailable, // "N/A": 号码池耗尽 / 查无此人
    Absent,       // 订单未给号码
}

impl FinalNumber {
    pub fn number(&self) -> Option<u32> {
        match self {
            FinalNumber::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FinalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinalNumber::Number(n) => write!(f, "{}", n),
            FinalNumber::NotAvailable => write!(f, "{}", NOT_AVAILABLE),
            // 缺失值约定: 空字符串
            FinalNumber::Absent => Ok(()),
        }
    }
}

/// 生成写回表格的号码文本
///
/// # 规则
/// - CHANGED → "CHANGED: <final>"
/// - 其他 → final 的普通字符串形式（Absent 为空串）
pub fn jersey_display_value(status: AssignmentStatus, final_number: FinalNumber) -> String {
    match status {
        AssignmentStatus::Changed => format!("{} {}", CHANGED_MARKER, final_number),
        _ => final_number.to_string(),
    }
}

// ==========================================
// 同名匹配策略 (Ambiguous Match Policy)
// ==========================================
// 名册中多行同名时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmbiguousMatchPolicy {
    #[default]
    FirstMatch, // 按输入顺序取第一行
    Error,      // 记为 ERROR，不写回
}

impl fmt::Display for AmbiguousMatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmbiguousMatchPolicy::FirstMatch => write!(f, "FIRST_MATCH"),
            AmbiguousMatchPolicy::Error => write!(f, "ERROR"),
        }
    }
}
