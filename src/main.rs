//! precis server binary.
//!
//! Run with:
//!   OPENROUTER_API_KEY=sk-or-... cargo run
//!
//! Try:
//!   curl -X POST http://127.0.0.1:5000/summarize \
//!        -H 'content-type: application/json' \
//!        -d '{"text":"The quick brown fox jumps over the lazy dog."}'

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use precis::{Config, OpenRouter, Server, Summarizer, app};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .init();

    info!(model = %config.model, base_url = %config.base_url, "starting precis");

    let provider = OpenRouter::from_config(&config);
    let summarizer = Summarizer::new(Arc::new(provider)).with_model(config.model.clone());

    let server = Server::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    server
        .serve(app::router(Arc::new(summarizer)))
        .await
        .context("server error")
}
