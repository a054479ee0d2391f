// ==========================================
// 球衣号码对账系统 - 配置层
// ==========================================
// 职责: 对账配置（目标商品、号码池、随机种子、输出文件名）
//       + 单次运行参数（输入路径、输出目录）
// 存储: JSON 配置文件
// ==========================================

pub mod config_manager;
pub mod run_config;

// 重导出核心配置
pub use config_manager::{
    config_keys, ConfigManager, NumberPool, OutputNames, ReconcileConfig, MAX_POOL_SIZE,
};
pub use run_config::RunConfig;
