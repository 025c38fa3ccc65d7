//! AI chat handler: exposes the relay over HTTP.
//!
//! The raw body bytes go straight to the relay, which applies the same checks
//! as for a gateway event.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::Method;

use crate::AppState;
use crate::models::GatewayResponse;

/// `ANY /ai-chat`: relay a chat message to the completion API.
pub async fn ai_chat_handler(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> GatewayResponse {
    state.relay.handle_http(method.as_str(), &body).await
}
