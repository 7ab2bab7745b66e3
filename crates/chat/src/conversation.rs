//! Bounded conversation log.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

pub use emo_events::ChatRole as Role;

/// Messages kept in the log; older ones are evicted.
pub const CONVERSATION_CAPACITY: usize = 10;

/// Messages sent to the backend as context.
pub const CONTEXT_MESSAGES: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Conversation {
    messages: VecDeque<ChatMessage>,
    /// Survives eviction so repeats are still caught after the log rolls over.
    last_assistant: Option<String>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. An assistant message identical to the previous
    /// assistant message is dropped and `false` is returned.
    pub fn push(&mut self, message: ChatMessage) -> bool {
        if message.role == Role::Assistant {
            if self.last_assistant.as_deref() == Some(message.content.as_str()) {
                tracing::debug!("suppressing repeated assistant message");
                return false;
            }
            self.last_assistant = Some(message.content.clone());
        }

        if self.messages.len() == CONVERSATION_CAPACITY {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
        true
    }

    /// The last `n` messages, oldest first.
    pub fn recent(&self, n: usize) -> Vec<ChatMessage> {
        let skip = self.messages.len().saturating_sub(n);
        self.messages.iter().skip(skip).cloned().collect()
    }

    pub fn last_assistant(&self) -> Option<&str> {
        self.last_assistant.as_deref()
    }

    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.last_assistant = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut conversation = Conversation::new();
        for i in 0..12 {
            conversation.push(ChatMessage::user(format!("m{i}")));
        }
        assert_eq!(conversation.len(), CONVERSATION_CAPACITY);
        assert_eq!(conversation.messages().next().unwrap().content, "m2");
    }

    #[test]
    fn test_repeated_assistant_suppressed() {
        let mut conversation = Conversation::new();
        assert!(conversation.push(ChatMessage::assistant("hi")));
        assert!(conversation.push(ChatMessage::user("hello")));
        assert!(!conversation.push(ChatMessage::assistant("hi")));
        assert!(conversation.push(ChatMessage::assistant("how are you?")));
        assert_eq!(conversation.len(), 3);
    }

    #[test]
    fn test_repeated_user_kept() {
        let mut conversation = Conversation::new();
        assert!(conversation.push(ChatMessage::user("ok")));
        assert!(conversation.push(ChatMessage::user("ok")));
        assert_eq!(conversation.len(), 2);
    }

    #[test]
    fn test_recent() {
        let mut conversation = Conversation::new();
        for i in 0..8 {
            conversation.push(ChatMessage::user(format!("m{i}")));
        }
        let recent = conversation.recent(CONTEXT_MESSAGES);
        assert_eq!(recent.len(), 6);
        assert_eq!(recent[0].content, "m2");
        assert_eq!(recent[5].content, "m7");

        assert_eq!(Conversation::new().recent(6).len(), 0);
    }

    #[test]
    fn test_clear() {
        let mut conversation = Conversation::new();
        conversation.push(ChatMessage::assistant("hi"));
        conversation.clear();
        assert!(conversation.is_empty());
        assert!(conversation.last_assistant().is_none());
        assert!(conversation.push(ChatMessage::assistant("hi")));
    }
}
