pub mod provider;
pub mod providers;

pub use provider::{ProviderError, ReplyProvider, ReplyRequest, reply_text};
pub use providers::{EchoProvider, LmStudioProvider, OllamaProvider};
