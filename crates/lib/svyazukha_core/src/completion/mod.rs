//! Completion module: single-turn chat completions for the messenger assistant.
//!
//! The relay never carries conversation history: every request is one fixed
//! system turn followed by one user turn.
//!
//! # Public API
//!
//! - [`openai::OpenAiClient`]: calls the chat-completions endpoint
//! - [`CompletionOptions`]: model and generation parameters
//! - [`CompletionError`]: typed failure of a completion call

pub mod openai;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default chat-completions endpoint.
pub const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// System instruction sent ahead of every user message.
pub const ASSISTANT_SYSTEM_PROMPT: &str =
    "Ты дружелюбный ИИ-ассистент в мессенджере Связуха. Отвечай кратко и по делу.";

/// Errors that can occur during a completion call.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The upstream answered with a non-2xx status. `body` is the raw response text.
    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The request never produced a response (connect, TLS, timeout, body read).
    #[error("{0}")]
    Transport(String),

    /// The upstream answered 2xx but the payload was not a usable completion.
    #[error("{0}")]
    MalformedResponse(String),
}

/// Chat message for the completions API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Model and generation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub model: String,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            system_prompt: ASSISTANT_SYSTEM_PROMPT.to_string(),
            max_tokens: 500,
            temperature: 0.7,
        }
    }
}

/// Outbound request body for `POST /v1/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ChatCompletionRequest {
    /// Build a single-turn request: the system prompt, then `user_message`.
    pub fn single_turn(options: &CompletionOptions, user_message: &str) -> Self {
        Self {
            model: options.model.clone(),
            messages: vec![
                Message::system(options.system_prompt.as_str()),
                Message::user(user_message),
            ],
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Extract the first choice's message content from a 2xx response body.
pub fn parse_completion(body: &str) -> Result<String, CompletionError> {
    let response: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        CompletionError::MalformedResponse(format!("OpenAI response parse error: {e}"))
    })?;

    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| {
            CompletionError::MalformedResponse("OpenAI returned empty choices array".to_string())
        })?
        .message
        .content
        .ok_or_else(|| {
            CompletionError::MalformedResponse("OpenAI choice has no message content".to_string())
        })
}
