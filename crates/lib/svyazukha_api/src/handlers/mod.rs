//! Request handlers.

pub mod ai_chat;
pub mod health;
