//! OpenAI chat-completions client.
//!
//! One POST per call, no retries. The request timeout is fixed when the
//! client is built.

use std::error::Error as StdError;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use super::{ChatCompletionRequest, CompletionError, CompletionOptions, parse_completion};

/// Chat-completions client bound to one endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    endpoint: Url,
    options: CompletionOptions,
}

impl OpenAiClient {
    /// Create a client for `endpoint` whose requests give up after `timeout`.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Transport(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            options: CompletionOptions::default(),
        })
    }

    /// Replace the generation parameters.
    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn options(&self) -> &CompletionOptions {
        &self.options
    }

    /// Send `user_message` as a single user turn and return the assistant's reply.
    pub async fn complete(
        &self,
        api_key: &str,
        user_message: &str,
    ) -> Result<String, CompletionError> {
        let request = ChatCompletionRequest::single_turn(&self.options, user_message);

        debug!(endpoint = %self.endpoint, model = %request.model, "sending chat completion");

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(describe(&e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            CompletionError::Transport(format!("Failed to read upstream response: {}", describe(&e)))
        })?;

        if !status.is_success() {
            return Err(CompletionError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        parse_completion(&body)
    }
}

/// Render an error with its full source chain, e.g.
/// `error sending request: client error (Connect): Connection refused`.
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = cause.source();
    }
    out
}
