// ==========================================
// 住宅建造估算系统 - 文本生成协作方
// ==========================================
// 职责: 调用本地模型生成施工方案叙述 (仅供参考)
// ==========================================

pub mod error;
pub mod ollama;

pub use error::AdvisorError;
pub use ollama::{build_prompt, OllamaNarrator, PlanNarrator};
