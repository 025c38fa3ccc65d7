//! # svyazukha_api
//!
//! HTTP API library for the Svyazukha AI chat relay.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

use axum::Router;
use axum::routing::{any, get};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::error::AppResult;
use crate::handlers::{ai_chat, health};
use crate::services::relay::ChatRelay;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Relay built from the API configuration.
    pub relay: ChatRelay,
}

impl AppState {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let relay = ChatRelay::from_config(config)?;
        Ok(Self { relay })
    }
}

/// Builds the Axum router with all routes and shared state.
///
/// CORS headers come from the relay itself, so no CORS layer is installed.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(routes::AI_CHAT, any(ai_chat::ai_chat_handler))
        .route(routes::GET_HEALTH, get(health::health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
