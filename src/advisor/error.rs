// ==========================================
// 住宅建造估算系统 - 文本生成协作方错误类型
// ==========================================

use thiserror::Error;

/// 文本生成错误 (仅影响建议文本, 不影响估算结果)
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("文本生成客户端初始化失败: {0}")]
    ClientInit(String),

    #[error("文本生成请求失败: {0}")]
    RequestFailed(String),

    #[error("文本生成服务返回 HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("文本生成响应无效: {0}")]
    InvalidResponse(String),
}
