// ==========================================
// 住宅建造估算系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口, 供命令行及其他调用方使用
// ==========================================

pub mod error;
pub mod project_api;
pub mod validator;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use project_api::{CreateProjectRequest, ProjectApi, ProjectDetail, ProjectSummary};
pub use validator::InputValidator;
