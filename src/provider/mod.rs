//! The external chat-completion collaborator.
//!
//! [`ChatCompletion`] is the only thing the summarizer knows about the LLM
//! provider. [`OpenRouter`] is the production implementation; tests swap in
//! a stub.

mod models;
mod openrouter;

use async_trait::async_trait;
use serde::Serialize;

pub use models::{Choice, ChoiceMessage, Completion};
pub use openrouter::{DEFAULT_BASE_URL, OpenRouter};

/// Who authored a chat message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One role-tagged message of a chat prompt.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Why a provider call failed.
///
/// The HTTP boundary reports every kind the same way (500 plus the message);
/// the kinds exist for logging.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("provider rejected credentials: {0}")]
    Auth(String),

    #[error("provider rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl ProviderError {
    /// Classifies a non-success HTTP status from the provider.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Auth(message),
            429 => Self::RateLimited(message),
            _ => Self::Api { status, message },
        }
    }

    /// Short, stable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "unavailable",
            Self::Auth(_) => "auth",
            Self::RateLimited(_) => "rate_limited",
            Self::InvalidResponse(_) => "invalid_response",
            Self::Api { .. } => "api",
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else {
            Self::Unavailable(e.to_string())
        }
    }
}

/// An opaque chat-completion service.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Sends `messages` to `model` and returns the provider's reply.
    async fn create(&self, model: &str, messages: &[ChatMessage]) -> Result<Completion, ProviderError>;
}
