//! Offline provider that repeats the submitted line back.

use async_trait::async_trait;

use crate::inference::{ProviderError, ReplyProvider, ReplyRequest};

pub struct EchoProvider;

#[async_trait]
impl ReplyProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    async fn reply(&self, request: ReplyRequest<'_>) -> Result<String, ProviderError> {
        Ok(format!("Bot: You said: {}", request.prompt))
    }
}
