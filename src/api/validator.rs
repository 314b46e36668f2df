// ==========================================
// 住宅建造估算系统 - 请求校验器
// ==========================================
// 职责: API 入口的参数校验 (身份/名称/输入/费率覆写)
// 数值输入规则与引擎一致, 统一复用 EstimationOrchestrator::validate_inputs
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::CostConfigOverride;
use crate::domain::project::ProjectInputs;
use crate::engine::EstimationOrchestrator;

/// 请求校验器
pub struct InputValidator;

impl InputValidator {
    /// 校验用户身份 (空白视为未登录)
    pub fn validate_user_id(user_id: &str) -> ApiResult<()> {
        if user_id.trim().is_empty() {
            return Err(ApiError::Unauthorized("用户ID不能为空".to_string()));
        }
        Ok(())
    }

    pub fn validate_project_id(project_id: &str) -> ApiResult<()> {
        if project_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("项目ID不能为空".to_string()));
        }
        Ok(())
    }

    pub fn validate_project_name(project_name: &str) -> ApiResult<()> {
        if project_name.trim().is_empty() {
            return Err(ApiError::InvalidInput("项目名称不能为空".to_string()));
        }
        Ok(())
    }

    /// 校验面积/楼层/工期
    pub fn validate_inputs(inputs: &ProjectInputs) -> ApiResult<()> {
        EstimationOrchestrator::validate_inputs(inputs)?;
        Ok(())
    }

    /// 校验费率覆写 (已指定项必须为有限正数)
    pub fn validate_override(overrides: &CostConfigOverride) -> ApiResult<()> {
        overrides
            .validate()
            .map_err(|e| ApiError::InvalidInput(e.to_string()))
    }

    /// 校验压缩目标工期
    pub fn validate_timeline(new_timeline: i32) -> ApiResult<()> {
        if new_timeline <= 0 {
            return Err(ApiError::InvalidInput(format!(
                "目标工期必须为正数, 实际为 {}",
                new_timeline
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_user_is_unauthorized() {
        assert!(matches!(
            InputValidator::validate_user_id("  "),
            Err(ApiError::Unauthorized(_))
        ));
        assert!(InputValidator::validate_user_id("user-1").is_ok());
    }

    #[test]
    fn test_inputs_and_override() {
        assert!(InputValidator::validate_inputs(&ProjectInputs::new(1000.0, 2, 24)).is_ok());
        assert!(matches!(
            InputValidator::validate_inputs(&ProjectInputs::new(-5.0, 2, 24)),
            Err(ApiError::InvalidInput(_))
        ));

        let overrides = CostConfigOverride {
            steel_rate: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(
            InputValidator::validate_override(&overrides),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(InputValidator::validate_timeline(0).is_err());
    }
}
