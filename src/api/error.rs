// ==========================================
// 住宅建造估算系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型, 将引擎/仓储错误转换为调用方可理解的错误
// ==========================================

use crate::config::ConfigError;
use crate::engine::error::EngineError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 调用方错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 缺少用户身份
    #[error("未授权: {0}")]
    Unauthorized(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 计算错误
    // ==========================================
    #[error("阶段工期退化: phase={phase}, duration_weeks={duration_weeks}")]
    DegenerateSchedule { phase: String, duration_weeks: i32 },

    #[error("缺少费率配置: {0}")]
    ConfigurationMissing(String),

    #[error("计算失败: {0}")]
    CalculationError(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidInput { field, reason } => {
                ApiError::InvalidInput(format!("{}: {}", field, reason))
            }
            EngineError::ConfigurationMissing { key } => ApiError::ConfigurationMissing(key),
            EngineError::DegenerateSchedule {
                phase,
                duration_weeks,
            } => ApiError::DegenerateSchedule {
                phase,
                duration_weeks,
            },
            EngineError::DivisionByZero { context } => {
                ApiError::CalculationError(format!("除零: {}", context))
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        EngineError::from(err).into()
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::DatabaseError(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::DatabaseError(format!("外键约束违反: {}", msg))
            }

            // 已存储数据无法还原
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InternalError(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::SerializationError(msg) => ApiError::InternalError(msg),

            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_errors_keep_their_kind() {
        let err: ApiError = EngineError::DegenerateSchedule {
            phase: "Finishing".to_string(),
            duration_weeks: -1,
        }
        .into();
        assert!(matches!(
            err,
            ApiError::DegenerateSchedule { duration_weeks: -1, .. }
        ));

        let err: ApiError = EngineError::DivisionByZero {
            context: "original_cost".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::CalculationError(_)));

        let err: ApiError = ConfigError::Missing {
            key: "steel_rate".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::ConfigurationMissing(key) if key == "steel_rate"));
    }

    #[test]
    fn test_repository_not_found_maps_to_not_found() {
        let err: ApiError = RepositoryError::NotFound {
            entity: "Project".to_string(),
            id: "p-1".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::NotFound(msg) if msg.contains("p-1")));
    }
}
