//! LM Studio provider using the OpenAI-compatible chat completions endpoint.
//!
//! Each submitted line is sent on its own as a single user message; the
//! conversation log is display text and is not replayed to the model.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{check_status, http_client};
use crate::inference::{ProviderError, ReplyProvider, ReplyRequest};

// ============================================================================
// Chat Completions API Types
// ============================================================================

/// Role in an input message (OpenAI terminology)
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "lowercase")]
enum Role {
    User,
}

#[derive(Serialize, Debug)]
struct InputMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<InputMessage<'a>>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: OutputMessage,
}

#[derive(Deserialize, Debug)]
struct OutputMessage {
    #[serde(default)]
    content: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// LM Studio API provider (local inference server, no auth)
pub struct LmStudioProvider {
    base_url: String,
    client: reqwest::Client,
}

impl LmStudioProvider {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: http_client(timeout)?,
        })
    }
}

#[async_trait]
impl ReplyProvider for LmStudioProvider {
    fn name(&self) -> &str {
        "lmstudio"
    }

    async fn reply(&self, request: ReplyRequest<'_>) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model: request.model,
            messages: vec![InputMessage {
                role: Role::User,
                content: request.prompt,
            }],
            stream: false,
        };

        info!(
            "LM Studio chat request: model={}, prompt_len={}",
            request.model,
            request.prompt.len()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body)
            .send()
            .await?;

        debug!("LM Studio response status: {}", response.status());
        let response = check_status(response).await?;

        let text = response.text().await?;
        let chat: ChatResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::Parse(e.to_string()))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| ProviderError::Parse("response contained no message".to_string()))
    }
}
