//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::core::geometry::ScreenGeometry;
use crate::core::state::App;
use crate::inference::{ProviderError, ReplyProvider, ReplyRequest};

/// A canned provider for tests that don't need real API calls.
pub struct StubProvider {
    outcome: Result<String, String>,
}

impl StubProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
        }
    }

    /// Fails every request with a network error carrying `reason`.
    pub fn failing(reason: &str) -> Self {
        Self {
            outcome: Err(reason.to_string()),
        }
    }
}

#[async_trait]
impl ReplyProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn reply(&self, _request: ReplyRequest<'_>) -> Result<String, ProviderError> {
        self.outcome.clone().map_err(ProviderError::Network)
    }
}

/// Creates an empty test App on a 24x80 screen.
pub fn test_app() -> App {
    App::new("test-model".to_string(), ScreenGeometry::default())
}
