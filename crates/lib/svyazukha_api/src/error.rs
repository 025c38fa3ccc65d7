//! Application error types.

use axum::http::StatusCode;
use svyazukha_core::completion::CompletionError;
use thiserror::Error;

use crate::models::{ErrorResponse, GatewayResponse};

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("OpenAI API key not configured")]
    MissingApiKey,

    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-2xx from the completion API; status and raw body are passed through.
    #[error("OpenAI API error ({status}): {details}")]
    Upstream { status: u16, details: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED.as_u16(),
            AppError::Validation(_) => StatusCode::BAD_REQUEST.as_u16(),
            AppError::Upstream { status, .. } => *status,
            AppError::MissingApiKey | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR.as_u16()
            }
        }
    }

    fn body(&self) -> ErrorResponse {
        let (error, details) = match self {
            AppError::MethodNotAllowed(_) => ("Method not allowed".to_string(), None),
            AppError::MissingApiKey => ("OpenAI API key not configured".to_string(), None),
            AppError::Validation(m) => (m.clone(), None),
            AppError::Upstream { details, .. } => {
                ("OpenAI API error".to_string(), Some(details.clone()))
            }
            AppError::Config(m) | AppError::Internal(m) => {
                ("Internal server error".to_string(), Some(m.clone()))
            }
        };
        ErrorResponse { error, details }
    }
}

impl From<AppError> for GatewayResponse {
    fn from(e: AppError) -> Self {
        GatewayResponse::json(e.status_code(), &e.body())
    }
}

impl From<CompletionError> for AppError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::Upstream { status, body } => AppError::Upstream {
                status,
                details: body,
            },
            CompletionError::Transport(msg) | CompletionError::MalformedResponse(msg) => {
                AppError::Internal(msg)
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}
