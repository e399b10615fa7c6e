//! Startup configuration.
//!
//! Every setting is a CLI flag with an environment-variable fallback. The
//! config is read once in `main` and handed to the components that need it;
//! nothing reads the environment afterwards.

use std::fmt;
use std::net::SocketAddr;

use clap::Parser;

use crate::provider::DEFAULT_BASE_URL;
use crate::summarize::DEFAULT_MODEL;

#[derive(Clone, Parser)]
#[command(name = "precis", version, about = "Summarize text through an LLM chat-completion API")]
pub struct Config {
    /// Bearer credential for the provider API.
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Address to listen on.
    #[arg(long, env = "PRECIS_ADDR", default_value = "127.0.0.1:5000")]
    pub addr: SocketAddr,

    /// Model identifier sent with every completion request.
    #[arg(long, env = "PRECIS_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Root of the OpenAI-compatible provider API.
    #[arg(long, env = "PRECIS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Value of the `http-referer` attribution header.
    #[arg(long, env = "PRECIS_REFERER")]
    pub referer: Option<String>,

    /// Value of the `x-title` attribution header.
    #[arg(long, env = "PRECIS_TITLE")]
    pub title: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, env = "PRECIS_DEBUG")]
    pub debug: bool,
}

impl Config {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("addr", &self.addr)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("referer", &self.referer)
            .field("title", &self.title)
            .field("debug", &self.debug)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "precis",
            "--api-key", "sk-test",
            "--addr", "0.0.0.0:8080",
            "--model", "anthropic/claude-3-haiku",
            "--debug",
        ])
        .unwrap();

        assert_eq!(config.addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.model, "anthropic/claude-3-haiku");
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = Config::try_parse_from(["precis", "--api-key", "sk-secret"]).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn rejects_bad_listen_address() {
        let res = Config::try_parse_from(["precis", "--api-key", "k", "--addr", "localhost"]);
        assert!(res.is_err());
    }
}
