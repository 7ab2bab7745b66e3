//! Chat side of the emotion session.
//!
//! The chat model itself lives behind [`ChatBackend`]; this crate keeps the
//! conversation log and answers locally when the backend is unavailable.

mod conversation;
mod error;
mod fallback;
mod http;
mod service;

pub use conversation::{ChatMessage, Conversation, Role, CONTEXT_MESSAGES, CONVERSATION_CAPACITY};
pub use error::{ChatError, Result};
pub use fallback::{fallback_response, greeting_prompt};
pub use http::{ChatReply, ChatRequest, HttpChatBackend, DEFAULT_CHAT_TIMEOUT, DEFAULT_CHAT_URL};
pub use service::{ChatService, Reply};

use async_trait::async_trait;

/// Generates assistant replies.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<String>;
}
