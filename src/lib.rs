//! # precis
//!
//! An HTTP service that summarizes text through an LLM chat-completion API.
//!
//! ```text
//! POST /summarize  {"text": "..."}
//!   200            {"summary": "..."}
//!   500            {"error": "..."}
//! ```
//!
//! One request, one provider call, one JSON reply. No caching, no retry,
//! no state between requests. Cross-origin calls are allowed from anywhere.
//!
//! The pieces underneath are a small hyper-based server: radix-tree routing
//! via [`matchit`], graceful shutdown on SIGTERM / Ctrl-C, CORS and tracing
//! middleware.
//!
//! ## Wiring it up
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use precis::{OpenRouter, Server, Summarizer, app};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), precis::Error> {
//!     let provider = OpenRouter::new("sk-or-...");
//!     let summarizer = Arc::new(Summarizer::new(Arc::new(provider)));
//!
//!     Server::bind("127.0.0.1:5000".parse().unwrap())
//!         .await?
//!         .serve(app::router(summarizer))
//!         .await
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod app;
pub mod config;
pub mod health;
pub mod middleware;
pub mod provider;
pub mod summarize;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use provider::{ChatCompletion, ChatMessage, Completion, OpenRouter, ProviderError, Role};
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use summarize::{Summarizer, SummaryRequest, SummaryResponse};
