// ==========================================
// 住宅建造估算系统 - 配置层
// ==========================================
// 职责: 费率配置 (默认值 + 显式覆写) 与运行时配置
// ==========================================

pub mod app_config;
pub mod cost_config;

// 重导出核心配置
pub use app_config::AppConfig;
pub use cost_config::{config_keys, ConfigError, CostConfig, CostConfigOverride};
