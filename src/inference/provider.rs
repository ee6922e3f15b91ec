use std::fmt;

use async_trait::async_trait;

/// Errors that can occur while asking a provider for a reply.
///
/// These never reach the session core: the event loop renders them as an
/// `error: ...` line in the conversation.
#[derive(Debug)]
pub enum ProviderError {
    /// Provider misconfigured (bad URL, client could not be built).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned an error response.
    Api { status: u16, message: String },
    /// Failed to parse the provider's response.
    Parse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProviderError::Parse(e.to_string())
        } else {
            ProviderError::Network(e.to_string())
        }
    }
}

/// Everything a provider needs to answer one submitted line.
pub struct ReplyRequest<'a> {
    pub prompt: &'a str,
    pub model: &'a str,
}

#[async_trait]
pub trait ReplyProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Produces a single reply string for the submitted line.
    async fn reply(&self, request: ReplyRequest<'_>) -> Result<String, ProviderError>;
}

/// Flattens a provider outcome into the text shown in the conversation.
pub fn reply_text(result: Result<String, ProviderError>) -> String {
    match result {
        Ok(text) => text,
        Err(e) => format!("error: {e}"),
    }
}
