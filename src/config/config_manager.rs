// ==========================================
// 球衣号码对账系统 - 配置管理器
// ==========================================
// 职责: 配置加载、默认值、校验
// 存储: JSON 配置文件（缺省键取默认值，未知键拒绝）
// 查找顺序: 显式路径 → 用户配置目录 → 内置默认
// ==========================================

use crate::domain::types::AmbiguousMatchPolicy;
use crate::importer::error::{ImportError, ImportResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 配置键（与 JSON 字段名一致，用于错误提示）
pub mod config_keys {
    pub const TARGET_PRODUCT: &str = "target_product";
    pub const NUMBER_POOL: &str = "number_pool";
    pub const RNG_SEED: &str = "rng_seed";
    pub const AMBIGUOUS_MATCH: &str = "ambiguous_match";
    pub const OUTPUTS: &str = "outputs";
}

pub const DEFAULT_TARGET_PRODUCT: &str = "GSSA Purple Game Jersey";
pub const CONFIG_DIR_NAME: &str = "jersey-reconcile";
pub const CONFIG_FILE_NAME: &str = "config.json";
/// 号码池最多容纳的号码个数
pub const MAX_POOL_SIZE: u64 = 10_000;

// ==========================================
// NumberPool - 号码池（闭区间）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumberPool {
    pub min: u32,
    pub max: u32,
}

impl Default for NumberPool {
    fn default() -> Self {
        Self { min: 1, max: 100 }
    }
}

impl NumberPool {
    pub fn numbers(&self) -> std::ops::RangeInclusive<u32> {
        self.min..=self.max
    }

    pub fn contains(&self, n: u32) -> bool {
        self.numbers().contains(&n)
    }

    /// 号码个数（min > max 时为 0）
    pub fn size(&self) -> u64 {
        if self.min > self.max {
            0
        } else {
            u64::from(self.max - self.min) + 1
        }
    }
}

impl fmt::Display for NumberPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

// ==========================================
// OutputNames - 输出文件名
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputNames {
    pub vendor_file: String,
    pub roster_file: String,
    pub report_file: String,
}

impl Default for OutputNames {
    fn default() -> Self {
        Self {
            vendor_file: "UPDATED_Vendor_Orders.csv".to_string(),
            roster_file: "UPDATED_Team_Assignments.csv".to_string(),
            report_file: "Process_Report.csv".to_string(),
        }
    }
}

// ==========================================
// ReconcileConfig - 对账配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconcileConfig {
    /// 目标商品名（精确匹配）
    pub target_product: String,
    /// 改号抽签范围
    pub number_pool: NumberPool,
    /// 随机种子；None 表示每次运行取系统熵
    pub rng_seed: Option<u64>,
    /// 名册同名策略
    pub ambiguous_match: AmbiguousMatchPolicy,
    pub outputs: OutputNames,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            target_product: DEFAULT_TARGET_PRODUCT.to_string(),
            number_pool: NumberPool::default(),
            rng_seed: None,
            ambiguous_match: AmbiguousMatchPolicy::default(),
            outputs: OutputNames::default(),
        }
    }
}

impl ReconcileConfig {
    /// 校验配置
    pub fn validate(&self) -> ImportResult<()> {
        if self.target_product.trim().is_empty() {
            return Err(ImportError::ConfigValueError {
                key: config_keys::TARGET_PRODUCT.to_string(),
                value: self.target_product.clone(),
                message: "目标商品名不能为空".to_string(),
            });
        }

        if self.number_pool.min > self.number_pool.max {
            return Err(ImportError::ConfigValueError {
                key: config_keys::NUMBER_POOL.to_string(),
                value: self.number_pool.to_string(),
                message: "min 不能大于 max".to_string(),
            });
        }
        if self.number_pool.size() > MAX_POOL_SIZE {
            return Err(ImportError::ConfigValueError {
                key: config_keys::NUMBER_POOL.to_string(),
                value: self.number_pool.to_string(),
                message: format!("号码池最多 {} 个号码", MAX_POOL_SIZE),
            });
        }

        let names = [
            &self.outputs.vendor_file,
            &self.outputs.roster_file,
            &self.outputs.report_file,
        ];
        for name in names {
            if name.trim().is_empty() || name.contains('/') || name.contains('\\') {
                return Err(ImportError::ConfigValueError {
                    key: config_keys::OUTPUTS.to_string(),
                    value: name.clone(),
                    message: "输出文件名必须是非空的纯文件名".to_string(),
                });
            }
        }
        if names[0] == names[1] || names[0] == names[2] || names[1] == names[2] {
            return Err(ImportError::ConfigValueError {
                key: config_keys::OUTPUTS.to_string(),
                value: format!("{}, {}, {}", names[0], names[1], names[2]),
                message: "输出文件名不能重复".to_string(),
            });
        }

        Ok(())
    }

    /// 构建随机数源（有种子则可复现）
    pub fn build_rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

// ==========================================
// ConfigManager - 配置加载
// ==========================================
pub struct ConfigManager;

impl ConfigManager {
    /// 从 JSON 字符串解析并校验
    pub fn from_json_str(json: &str) -> ImportResult<ReconcileConfig> {
        let config: ReconcileConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载
    pub fn load(path: &Path) -> ImportResult<ReconcileConfig> {
        let raw = fs::read_to_string(path).map_err(|e| ImportError::ConfigReadError {
            key: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_json_str(&raw)?;
        info!(path = %path.display(), "配置已加载");
        Ok(config)
    }

    /// 显式路径优先；否则尝试用户配置目录；都没有则用默认配置
    pub fn load_or_default(path: Option<&Path>) -> ImportResult<ReconcileConfig> {
        if let Some(p) = path {
            return Self::load(p);
        }

        match Self::default_config_path() {
            Some(p) if p.is_file() => Self::load(&p),
            _ => {
                debug!("未找到配置文件，使用默认配置");
                Ok(ReconcileConfig::default())
            }
        }
    }

    /// 默认配置文件路径: <config_dir>/jersey-reconcile/config.json
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_defaults() {
        let config = ReconcileConfig::default();
        assert_eq!(config.target_product, "GSSA Purple Game Jersey");
        assert_eq!(config.number_pool, NumberPool { min: 1, max: 100 });
        assert_eq!(config.ambiguous_match, AmbiguousMatchPolicy::FirstMatch);
        assert_eq!(config.outputs.report_file, "Process_Report.csv");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ConfigManager::from_json_str(r#"{"number_pool": {"min": 0, "max": 99}}"#)
            .unwrap();
        assert_eq!(config.number_pool.min, 0);
        assert_eq!(config.target_product, DEFAULT_TARGET_PRODUCT);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = ConfigManager::from_json_str(r#"{"target_prodcut": "X"}"#);
        assert!(matches!(result, Err(ImportError::ConfigReadError { .. })));
    }

    #[test]
    fn test_invalid_pool_rejected() {
        let result = ConfigManager::from_json_str(r#"{"number_pool": {"min": 10, "max": 5}}"#);
        match result {
            Err(ImportError::ConfigValueError { key, .. }) => assert_eq!(key, "number_pool"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_blank_product_rejected() {
        let result = ConfigManager::from_json_str(r#"{"target_product": "  "}"#);
        assert!(matches!(result, Err(ImportError::ConfigValueError { .. })));
    }

    #[test]
    fn test_output_names_must_differ() {
        let result = ConfigManager::from_json_str(
            r#"{"outputs": {"vendor_file": "a.csv", "roster_file": "a.csv"}}"#,
        );
        assert!(matches!(result, Err(ImportError::ConfigValueError { .. })));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = ReconcileConfig {
            rng_seed: Some(11),
            ..Default::default()
        };
        let a: u32 = config.build_rng().gen();
        let b: u32 = config.build_rng().gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_pool_display_and_contains() {
        let pool = NumberPool { min: 1, max: 100 };
        assert_eq!(pool.to_string(), "1-100");
        assert!(pool.contains(100));
        assert!(!pool.contains(0));
        assert_eq!(pool.numbers().count(), 100);
    }
}
