// ==========================================
// 住宅建造估算系统 - 引擎层错误类型
// ==========================================
// 全部为纯计算前置条件失败, 相同输入必然相同错误, 不可重试
// 工具: thiserror 派生宏
// ==========================================

use crate::config::ConfigError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// 输入非正 (面积/楼层/工期/成本)
    #[error("无效输入 (field={field}): {reason}")]
    InvalidInput { field: String, reason: String },

    /// 必需费率缺失且无默认值
    #[error("缺少费率配置: {key}")]
    ConfigurationMissing { key: String },

    /// 阶段工期计算为负, 无法生成周计划
    #[error("阶段工期退化: phase={phase}, duration_weeks={duration_weeks}")]
    DegenerateSchedule { phase: String, duration_weeks: i32 },

    #[error("除零: {context}")]
    DivisionByZero { context: String },
}

impl EngineError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Missing { key } => EngineError::ConfigurationMissing { key },
            ConfigError::NonPositiveRate { key, value } => EngineError::InvalidInput {
                field: key,
                reason: format!("费率必须为正数, 实际为 {}", value),
            },
            ConfigError::UnknownKey(key) => EngineError::InvalidInput {
                field: key,
                reason: "未知费率键".to_string(),
            },
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
