//! Route paths.

pub const AI_CHAT: &str = "/ai-chat";
pub const GET_HEALTH: &str = "/health";
