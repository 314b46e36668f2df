// ==========================================
// 住宅建造估算系统 - 本地文本生成客户端
// ==========================================
// 协议: POST {model, prompt, stream: false} → {"response": "..."}
// 红线: 仅生成建议文本, 不参与任何数值计算
// ==========================================

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::advisor::error::AdvisorError;
use crate::config::AppConfig;
use crate::domain::project::ProjectInputs;

/// 施工方案叙述生成器
#[async_trait]
pub trait PlanNarrator: Send + Sync {
    /// 为项目输入生成叙述性建议
    async fn narrate(&self, inputs: &ProjectInputs) -> Result<String, AdvisorError>;
}

/// 构造提示词 (纯函数)
pub fn build_prompt(inputs: &ProjectInputs) -> String {
    format!(
        "You are an AI construction planning assistant for Indian residential projects.\n\
         \n\
         Generate:\n\
         1) Floor-wise blueprint layout (text)\n\
         2) Week-by-week construction schedule\n\
         3) Workforce & cost overview\n\
         \n\
         Inputs:\n\
         Area: {} sq ft\n\
         Floors: {}\n\
         Timeline: {} weeks\n",
        inputs.built_up_area, inputs.number_of_floors, inputs.project_timeline
    )
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

// ==========================================
// OllamaNarrator - 本地模型客户端
// ==========================================
pub struct OllamaNarrator {
    client: Client,
    url: String,
    model: String,
}

impl OllamaNarrator {
    /// 创建客户端 (请求超时取自 `advisor_timeout`)
    ///
    /// # 返回
    /// - Err(ClientInit): HTTP 客户端构建失败
    pub fn new(config: &AppConfig) -> Result<Self, AdvisorError> {
        let client = Client::builder()
            .timeout(config.advisor_timeout)
            .build()
            .map_err(|e| AdvisorError::ClientInit(e.to_string()))?;

        Ok(Self {
            client,
            url: config.ollama_url.clone(),
            model: config.ollama_model.clone(),
        })
    }
}

#[async_trait]
impl PlanNarrator for OllamaNarrator {
    async fn narrate(&self, inputs: &ProjectInputs) -> Result<String, AdvisorError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: build_prompt(inputs),
            stream: false,
        };

        debug!(url = %self.url, model = %self.model, "发送文本生成请求");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("文本生成请求失败: {}", e);
                AdvisorError::RequestFailed(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AdvisorError::RequestFailed(e.to_string()))?;

        debug!(status = %status, "文本生成响应");

        if !status.is_success() {
            return Err(AdvisorError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        parse_response(&body)
    }
}

fn parse_response(body: &str) -> Result<String, AdvisorError> {
    serde_json::from_str::<GenerateResponse>(body)
        .map(|r| r.response)
        .map_err(|e| AdvisorError::InvalidResponse(format!("JSON 解析失败: {}", e)))
}
