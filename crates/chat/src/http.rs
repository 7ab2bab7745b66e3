//! HTTP chat backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::conversation::ChatMessage;
use crate::error::{ChatError, Result};
use crate::ChatBackend;

pub const DEFAULT_CHAT_URL: &str = "http://localhost:3001/api/chat";
pub const DEFAULT_CHAT_TIMEOUT: Duration = Duration::from_secs(30);

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    /// Wire name of the stable emotion.
    pub emotion: String,
    pub emotion_name: String,
    #[serde(default)]
    pub conversation_history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

pub struct HttpChatBackend {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpChatBackend {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_transport(&self, e: reqwest::Error) -> ChatError {
        if e.is_timeout() {
            ChatError::Timeout {
                millis: self.timeout.as_millis() as u64,
            }
        } else {
            ChatError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        tracing::debug!(
            endpoint = %self.endpoint,
            emotion = %request.emotion,
            history = request.conversation_history.len(),
            "sending chat request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| ChatError::InvalidResponse(e.to_string()))?;

        let text = reply.response.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyReply);
        }
        Ok(text.to_string())
    }
}
