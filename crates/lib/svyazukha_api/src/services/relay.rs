//! Chat relay: validates a gateway event, forwards the message to the
//! completion API and shapes every outcome into a [`GatewayResponse`].
//!
//! Order of checks, first match wins:
//! 1. `OPTIONS` → CORS pre-flight
//! 2. anything but `POST` → 405
//! 3. no credential → 500
//! 4. blank or missing `message` → 400
//! 5. upstream call → 200, passthrough status, or 500

use std::fmt;

use axum::http::{Method, StatusCode};
use serde_json::Value;
use svyazukha_core::completion::openai::OpenAiClient;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};
use crate::models::{ChatMessageRequest, ChatReplyResponse, GatewayRequest, GatewayResponse};

/// Stateless relay between the messenger and the completion API.
#[derive(Clone)]
pub struct ChatRelay {
    api_key: Option<String>,
    client: OpenAiClient,
}

impl fmt::Debug for ChatRelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatRelay")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("client", &self.client)
            .finish()
    }
}

impl ChatRelay {
    /// Build a relay from configuration. Fails only on an unusable endpoint URL.
    pub fn from_config(config: &ApiConfig) -> AppResult<Self> {
        let endpoint: Url = config
            .openai_api_url
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid OpenAI API URL: {e}")))?;

        let client = OpenAiClient::new(endpoint, config.upstream_timeout)
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self::new(config.openai_api_key.clone(), client))
    }

    /// `api_key` is used as given; [`ApiConfig`] already drops empty credentials.
    pub fn new(api_key: Option<String>, client: OpenAiClient) -> Self {
        Self { api_key, client }
    }

    /// Handle one gateway event. Always produces a shaped response.
    pub async fn handle(&self, request: GatewayRequest) -> GatewayResponse {
        let body = request.body.as_deref().map(str::as_bytes);
        self.respond(&request.http_method, body).await
    }

    /// Handle a raw HTTP request. The body is parsed as bytes, so invalid
    /// UTF-8 is rejected as malformed JSON rather than repaired.
    pub async fn handle_http(&self, method: &str, body: &[u8]) -> GatewayResponse {
        let body = (!body.is_empty()).then_some(body);
        self.respond(method, body).await
    }

    async fn respond(&self, method: &str, body: Option<&[u8]>) -> GatewayResponse {
        info!(method = %method, "ai-chat request");

        match self.relay(method, body).await {
            Ok(response) => response,
            Err(e) => {
                match &e {
                    AppError::Upstream { status, .. } => {
                        warn!(status = *status, "OpenAI API error")
                    }
                    AppError::MissingApiKey | AppError::Config(_) | AppError::Internal(_) => {
                        error!("ai-chat failed: {e}")
                    }
                    AppError::MethodNotAllowed(_) | AppError::Validation(_) => {
                        debug!("ai-chat rejected: {e}")
                    }
                }
                GatewayResponse::from(e)
            }
        }
    }

    async fn relay(&self, method: &str, body: Option<&[u8]>) -> AppResult<GatewayResponse> {
        if method == Method::OPTIONS.as_str() {
            return Ok(GatewayResponse::preflight());
        }
        if method != Method::POST.as_str() {
            return Err(AppError::MethodNotAllowed(method.to_string()));
        }

        let api_key = self.api_key.as_deref().ok_or(AppError::MissingApiKey)?;

        let body: ChatMessageRequest = serde_json::from_slice(body.unwrap_or(b"{}"))?;
        let message = body
            .trimmed_message()
            .ok_or_else(|| AppError::Validation("Message is required".into()))?;

        let reply = self.client.complete(api_key, message).await?;

        Ok(GatewayResponse::json(
            StatusCode::OK.as_u16(),
            &ChatReplyResponse {
                message: reply,
                timestamp: body
                    .timestamp
                    .unwrap_or_else(|| Value::String(String::new())),
            },
        ))
    }
}
