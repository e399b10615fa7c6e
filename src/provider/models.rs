//! Wire types of the chat-completion API.
//!
//! Only the fields precis reads are modelled; unknown fields are ignored.

use serde::{Deserialize, Serialize};

use super::{ChatMessage, ProviderError};

#[derive(Serialize)]
pub(super) struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
}

/// A chat-completion reply, reduced to the fields precis reads.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Completion {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl Completion {
    /// A reply with a single choice whose content is `text`.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice { message: ChoiceMessage { content: Some(text.into()) } }],
        }
    }

    /// Content of `choices[0].message`.
    pub fn first_content(&self) -> Result<&str, ProviderError> {
        let choice = self.choices.first()
            .ok_or_else(|| ProviderError::InvalidResponse("reply has no choices".to_owned()))?;
        choice.message.content.as_deref()
            .ok_or_else(|| ProviderError::InvalidResponse("first choice has no content".to_owned()))
    }
}

/// Wire shape of a reply: choices on success, an error object otherwise.
#[derive(Deserialize)]
pub(super) struct CompletionReply {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Deserialize)]
pub(super) struct ErrorEnvelope {
    pub error: ApiError,
}

#[derive(Deserialize)]
pub(super) struct ApiError {
    pub message: String,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}
