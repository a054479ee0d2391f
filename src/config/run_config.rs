// ==========================================
// 球衣号码对账系统 - 单次运行参数
// ==========================================
// 职责: 输入文件路径 + 输出目录（替代界面层全局状态）
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub vendor_path: PathBuf,
    pub roster_path: PathBuf,
    /// None → 与订单表同目录
    pub output_dir: Option<PathBuf>,
}

impl RunConfig {
    pub fn new(vendor_path: impl Into<PathBuf>, roster_path: impl Into<PathBuf>) -> Self {
        Self {
            vendor_path: vendor_path.into(),
            roster_path: roster_path.into(),
            output_dir: None,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// 实际输出目录
    pub fn resolved_output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => match self.vendor_path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => Path::new(".").to_path_buf(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dir_defaults_to_vendor_dir() {
        let run = RunConfig::new("/data/orders/vendor.xlsx", "/data/roster.csv");
        assert_eq!(run.resolved_output_dir(), PathBuf::from("/data/orders"));
    }

    #[test]
    fn test_bare_file_name_uses_current_dir() {
        let run = RunConfig::new("vendor.csv", "roster.csv");
        assert_eq!(run.resolved_output_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_explicit_output_dir() {
        let run = RunConfig::new("/a/v.csv", "/a/r.csv").with_output_dir("/out");
        assert_eq!(run.resolved_output_dir(), PathBuf::from("/out"));
    }
}
