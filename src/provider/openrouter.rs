//! OpenRouter chat-completion client.
//!
//! Speaks the OpenAI-compatible `POST {base_url}/chat/completions` API with
//! bearer-token auth. Non-2xx replies are classified by status; OpenRouter can
//! also embed an `error` object in a 200 reply, which is classified by its
//! own `code`.

use async_trait::async_trait;
use tracing::{debug, error};

use super::models::{CompletionReply, CompletionRequest, ErrorEnvelope};
use super::{ChatCompletion, ChatMessage, Completion, ProviderError};
use crate::config::Config;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// OpenAI-compatible chat-completion client for OpenRouter.
///
/// No timeout and no retry: a request waits as long as the provider takes
/// and a failure is returned as-is.
pub struct OpenRouter {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    referer: Option<String>,
    title: Option<String>,
}

impl OpenRouter {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            referer: None,
            title: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key.clone())
            .with_base_url(config.base_url.clone())
            .with_attribution(config.referer.clone(), config.title.clone())
    }

    /// Points the client at another OpenAI-compatible API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the optional `http-referer` and `x-title` headers OpenRouter uses
    /// to attribute traffic to an app.
    pub fn with_attribution(mut self, referer: Option<String>, title: Option<String>) -> Self {
        self.referer = referer;
        self.title = title;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatCompletion for OpenRouter {
    async fn create(&self, model: &str, messages: &[ChatMessage]) -> Result<Completion, ProviderError> {
        let request = CompletionRequest { model, messages };

        let mut builder = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request);
        if let Some(referer) = &self.referer {
            builder = builder.header("http-referer", referer);
        }
        if let Some(title) = &self.title {
            builder = builder.header("x-title", title);
        }

        debug!(model, messages = messages.len(), "sending chat completion");
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| {
                if body.trim().is_empty() { status.to_string() } else { body }
            });
            error!(%status, %message, "provider API error");
            return Err(ProviderError::from_status(status.as_u16(), message));
        }

        parse_reply(&body, status.as_u16())
    }
}

/// Pulls `error.message` out of a JSON error body.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
}

fn parse_reply(body: &str, status: u16) -> Result<Completion, ProviderError> {
    let reply: CompletionReply = serde_json::from_str(body)
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

    // OpenRouter reports some upstream failures inside a 200 body.
    if let Some(err) = reply.error {
        let code = err.code
            .as_ref()
            .and_then(serde_json::Value::as_u64)
            .and_then(|c| u16::try_from(c).ok())
            .unwrap_or(status);
        return Err(ProviderError::from_status(code, err.message));
    }

    Ok(Completion { choices: reply.choices })
}

#[cfg(test)]
#[path = "openrouter_tests.rs"]
mod http_tests;
