//! The `/summarize` handler.
//!
//! Every request becomes the same two-message prompt, one provider call, and
//! exactly one JSON reply: `{"summary": ..}` at 200 or `{"error": ..}` at 500.
//! A body that is not a JSON object is a 400 and never reaches the provider.
//!
//! `text` is loosely typed on the wire. Strings pass through untouched, a
//! missing or `null` field is the empty string, and any other JSON value is
//! rendered the way a Python `str()` would print it (`42`, `True`, `['a']`),
//! so `{"text": 42}` is summarized as `"Summarize this: 42"`.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::provider::{ChatCompletion, ChatMessage, ProviderError};
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;

pub const SYSTEM_PROMPT: &str = "You are a helpful summarizer.";
pub const USER_PREFIX: &str = "Summarize this: ";
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";

/// Body of `POST /summarize`.
#[derive(Debug, Default, PartialEq)]
pub struct SummaryRequest {
    pub text: String,
}

impl SummaryRequest {
    /// Reads `text` from a decoded JSON object.
    pub fn from_object(body: &Map<String, Value>) -> Self {
        let text = match body.get("text") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => python_str(other),
        };
        Self { text }
    }
}

/// Renders a non-string JSON value like Python's `str()`.
fn python_str(value: &Value) -> String {
    match value {
        Value::Null => "None".to_owned(),
        Value::Bool(true) => "True".to_owned(),
        Value::Bool(false) => "False".to_owned(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(python_repr).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(fields) => {
            let fields: Vec<String> = fields
                .iter()
                .map(|(k, v)| format!("{}: {}", quote(k), python_repr(v)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
    }
}

/// Like [`python_str`], but strings nested in containers are quoted.
fn python_repr(value: &Value) -> String {
    match value {
        Value::String(s) => quote(s),
        other => python_str(other),
    }
}

/// Python's string repr: single quotes unless the text has a `'` and no `"`.
fn quote(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\");
    if s.contains('\'') && !s.contains('"') {
        format!("\"{escaped}\"")
    } else {
        format!("'{}'", escaped.replace('\'', "\\'"))
    }
}

/// Reply of `POST /summarize`.
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SummaryResponse {
    Summary { summary: String },
    Error { error: String },
}

impl SummaryResponse {
    pub fn status(&self) -> Status {
        match self {
            Self::Summary { .. } => Status::Ok,
            Self::Error { .. } => Status::InternalServerError,
        }
    }
}

impl From<Result<String, ProviderError>> for SummaryResponse {
    fn from(res: Result<String, ProviderError>) -> Self {
        match res {
            Ok(summary) => Self::Summary { summary },
            Err(e) => Self::Error { error: e.to_string() },
        }
    }
}

impl IntoResponse for SummaryResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// The fixed prompt for `text`: system instruction, then prefix + text.
pub fn build_prompt(text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(format!("{USER_PREFIX}{text}")),
    ]
}

/// Summarizes text with one chat-completion call.
pub struct Summarizer {
    provider: Arc<dyn ChatCompletion>,
    model: String,
}

impl Summarizer {
    pub fn new(provider: Arc<dyn ChatCompletion>) -> Self {
        Self { provider, model: DEFAULT_MODEL.to_owned() }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Returns the trimmed content of the provider's first choice.
    pub async fn summarize(&self, text: &str) -> Result<String, ProviderError> {
        let messages = build_prompt(text);
        let completion = self.provider.create(&self.model, &messages).await?;
        Ok(completion.first_content()?.trim().to_owned())
    }
}

/// `POST /summarize`
pub async fn handle(summarizer: Arc<Summarizer>, req: Request) -> Response {
    // Decoding into a map rejects arrays, scalars and `null` at the top level.
    let input = match req.json::<Map<String, Value>>() {
        Ok(body) => SummaryRequest::from_object(&body),
        Err(e) => {
            debug!("rejecting summarize body: {e}");
            let body = SummaryResponse::Error { error: format!("invalid JSON body: {e}") };
            return (Status::BadRequest, Json(body)).into_response();
        }
    };

    debug!(chars = input.text.chars().count(), "summarizing");
    let result = summarizer.summarize(&input.text).await;
    if let Err(e) = &result {
        warn!(kind = e.kind(), "summarize failed: {e}");
    }

    SummaryResponse::from(result).into_response()
}
