// ==========================================
// 住宅建造估算系统 - 运行时配置
// ==========================================
// 职责: 数据库路径 + 文本生成协作方参数
// 来源: 环境变量 (缺省回落默认值)
// ==========================================

use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "CONSTRUCTION_PLANNER_DB_PATH";
pub const ENV_OLLAMA_URL: &str = "CONSTRUCTION_PLANNER_OLLAMA_URL";
pub const ENV_OLLAMA_MODEL: &str = "CONSTRUCTION_PLANNER_OLLAMA_MODEL";
pub const ENV_ADVISOR_TIMEOUT_SECS: &str = "CONSTRUCTION_PLANNER_ADVISOR_TIMEOUT_SECS";

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_OLLAMA_MODEL: &str = "granite3.3:2b";
pub const DEFAULT_ADVISOR_TIMEOUT_SECS: u64 = 120;

/// 运行时配置
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite 数据库路径
    pub db_path: String,
    /// 文本生成服务地址
    pub ollama_url: String,
    /// 文本生成模型
    pub ollama_model: String,
    /// 文本生成超时
    pub advisor_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            advisor_timeout: Duration::from_secs(DEFAULT_ADVISOR_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// 从环境变量加载
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意查找函数加载 (便于测试)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();

        let advisor_timeout = match non_empty(ENV_ADVISOR_TIMEOUT_SECS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(value = %raw, "文本生成超时配置无效, 使用默认值");
                    defaults.advisor_timeout
                }
            },
            None => defaults.advisor_timeout,
        };

        Self {
            db_path: non_empty(ENV_DB_PATH).unwrap_or(defaults.db_path),
            ollama_url: non_empty(ENV_OLLAMA_URL).unwrap_or(defaults.ollama_url),
            ollama_model: non_empty(ENV_OLLAMA_MODEL).unwrap_or(defaults.ollama_model),
            advisor_timeout,
        }
    }
}

/// 默认数据库路径
///
/// 优先使用用户数据目录, 获取失败时回落到当前目录
pub fn default_db_path() -> String {
    let mut path = PathBuf::from("./construction_planner.db");

    if let Some(data_dir) = dirs::data_dir() {
        let app_dir = data_dir.join("construction-planner");
        if std::fs::create_dir_all(&app_dir).is_ok() {
            path = app_dir.join("construction_planner.db");
        }
    }

    path.to_string_lossy().to_string()
}
