//! Ollama provider using the `/api/generate` endpoint.
//!
//! One prompt in, one completed reply out. Streaming is switched off since
//! the conversation view only ever shows the finished line.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{check_status, http_client};
use crate::inference::{ProviderError, ReplyProvider, ReplyRequest};

// ============================================================================
// Ollama Generate API Types
// ============================================================================

#[derive(Serialize, Debug)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    response: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct OllamaProvider {
    base_url: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: http_client(timeout)?,
        })
    }
}

#[async_trait]
impl ReplyProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn reply(&self, request: ReplyRequest<'_>) -> Result<String, ProviderError> {
        let body = GenerateRequest {
            model: request.model,
            prompt: request.prompt,
            stream: false,
        };

        info!(
            "Ollama generate request: model={}, prompt_len={}",
            request.model,
            request.prompt.len()
        );

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await?;

        debug!("Ollama response status: {}", response.status());
        let response = check_status(response).await?;

        let text = response.text().await?;
        let generated: GenerateResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::Parse(e.to_string()))?;

        info!("Ollama reply received: {} bytes", generated.response.len());
        Ok(generated.response.trim().to_string())
    }
}
