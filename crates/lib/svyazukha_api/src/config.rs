//! API server configuration.

use std::time::Duration;

use svyazukha_core::completion::OPENAI_CHAT_COMPLETIONS_URL;

/// Default bound on one outbound completion call.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// Bearer credential for the completion API. `None` when unset or empty.
    pub openai_api_key: Option<String>,
    /// Chat-completions endpoint.
    pub openai_api_url: String,
    /// Timeout applied to each outbound completion request.
    pub upstream_timeout: Duration,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                | Default                                      |
    /// |-------------------------|----------------------------------------------|
    /// | `BIND_ADDR`             | `127.0.0.1:3100`                             |
    /// | `OPENAI_API_KEY`        | unset (requests fail with 500)               |
    /// | `OPENAI_API_URL`        | `https://api.openai.com/v1/chat/completions` |
    /// | `UPSTREAM_TIMEOUT_SECS` | `30`                                         |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3100".into()),
            openai_api_key: non_empty(std::env::var("OPENAI_API_KEY").ok()),
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| OPENAI_CHAT_COMPLETIONS_URL.into()),
            upstream_timeout: std::env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT),
        }
    }

    /// Replace the credential; empty strings count as absent.
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.openai_api_key = non_empty(key);
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3100".into(),
            openai_api_key: None,
            openai_api_url: OPENAI_CHAT_COMPLETIONS_URL.into(),
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
