//! Conversation state and reply generation.
//!
//! The conversation lock is never held across a backend call.

use std::sync::Arc;

use emo_emotion::Emotion;
use tokio::sync::Mutex;

use crate::conversation::{ChatMessage, Conversation, CONTEXT_MESSAGES};
use crate::fallback::fallback_response;
use crate::http::ChatRequest;
use crate::ChatBackend;

/// Result of [`ChatService::respond`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// True when the backend failed and a canned reply was used.
    pub fallback: bool,
    /// False when the reply repeated the previous assistant message and was
    /// not added to the conversation.
    pub recorded: bool,
}

/// Conversation plus the backend that answers it.
pub struct ChatService {
    backend: Arc<dyn ChatBackend>,
    conversation: Mutex<Conversation>,
}

impl ChatService {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            conversation: Mutex::new(Conversation::new()),
        }
    }

    /// Append a user message to the conversation.
    pub async fn record_user(&self, text: impl Into<String>) {
        self.conversation.lock().await.push(ChatMessage::user(text));
    }

    /// Ask the backend for a reply to `message` and record it.
    ///
    /// Backend errors are logged and answered from the local fallback table.
    pub async fn respond(&self, message: &str, stable: Option<Emotion>) -> Reply {
        let emotion = stable.unwrap_or(Emotion::Neutral);
        let request = ChatRequest {
            message: message.to_string(),
            emotion: emotion.as_str().to_string(),
            emotion_name: emotion.display_name().to_string(),
            conversation_history: self.conversation.lock().await.recent(CONTEXT_MESSAGES),
        };

        let result = self.backend.complete(&request).await;

        let mut conversation = self.conversation.lock().await;
        let (text, fallback) = match result {
            Ok(text) => (text, false),
            Err(e) => {
                tracing::warn!(emotion = %emotion.as_str(), "chat backend failed, using fallback: {}", e);
                let text = fallback_response(
                    stable,
                    conversation.last_assistant(),
                    &mut rand::thread_rng(),
                );
                (text.to_string(), true)
            }
        };

        let recorded = conversation.push(ChatMessage::assistant(text.clone()));
        Reply {
            text,
            fallback,
            recorded,
        }
    }

    /// Snapshot of the conversation, oldest first.
    pub async fn history(&self) -> Vec<ChatMessage> {
        self.conversation.lock().await.messages().cloned().collect()
    }

    /// Empty the conversation, including the remembered last assistant reply.
    pub async fn clear(&self) {
        self.conversation.lock().await.clear();
    }
}
