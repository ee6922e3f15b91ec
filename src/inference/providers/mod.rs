mod echo;
mod lmstudio;
mod ollama;

pub use echo::EchoProvider;
pub use lmstudio::LmStudioProvider;
pub use ollama::OllamaProvider;

use log::warn;
use std::time::Duration;

use crate::inference::ProviderError;

/// Builds the shared HTTP client with the reply timeout applied.
fn http_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Config(e.to_string()))
}

/// Turns a non-2xx response into `ProviderError::Api`.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    warn!("Provider API error: {} - {}", status, message);
    Err(ProviderError::Api { status, message })
}
