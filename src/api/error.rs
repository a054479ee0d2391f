// ==========================================
// 球衣号码对账系统 - API层错误类型
// ==========================================
// 职责: 将导入层/配置层错误转换为调用方可读的单一失败信息
// ==========================================

use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("文件导入失败: {0}")]
    ImportError(#[from] ImportError),

    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// API层Result类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_conversion() {
        let err: ApiError = ImportError::MissingColumn {
            table: "roster".to_string(),
            column: "Jersey".to_string(),
        }
        .into();

        let msg = err.to_string();
        assert!(msg.contains("roster"));
        assert!(msg.contains("Jersey"));
    }
}
