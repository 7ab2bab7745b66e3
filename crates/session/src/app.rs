//! Complete session: detection loop plus chat, built from settings.

use std::sync::Arc;

use emo_chat::{ChatBackend, ChatService, HttpChatBackend};
use emo_classifier::{EmotionClassifier, FrameSource, HttpClassifier};
use emo_events::EventBusRef;
use uuid::Uuid;

use crate::chat_controller::{ChatController, SendOutcome};
use crate::detection::DetectionSession;
use crate::error::Result;
use crate::settings::SessionSettings;

/// Detection loop and chat controller sharing one event bus.
pub struct EmoSession {
    settings: SessionSettings,
    classifier: Arc<dyn EmotionClassifier>,
    chat: Arc<ChatController>,
    detection: DetectionSession,
}

impl EmoSession {
    /// Session talking to the HTTP classifier and chat services named in `settings`.
    pub fn new(settings: SessionSettings, bus: EventBusRef) -> Result<Self> {
        settings.validate()?;
        let classifier = HttpClassifier::new(&settings.classifier_url, settings.classifier_timeout())?;
        let backend = HttpChatBackend::new(&settings.chat_url, settings.chat_timeout())?;
        Ok(Self::with_parts(
            settings,
            bus,
            Arc::new(classifier),
            Arc::new(backend),
        ))
    }

    /// Session with caller-supplied collaborators.
    pub fn with_parts(
        settings: SessionSettings,
        bus: EventBusRef,
        classifier: Arc<dyn EmotionClassifier>,
        backend: Arc<dyn ChatBackend>,
    ) -> Self {
        let service = Arc::new(ChatService::new(backend));
        let chat = Arc::new(ChatController::new(
            service,
            Arc::clone(&bus),
            settings.send_cooldown(),
        ));
        let detection = DetectionSession::new(settings.tick(), bus);

        Self {
            settings,
            classifier,
            chat,
            detection,
        }
    }

    /// Begin sampling `frames`. A no-op returning the current id while running.
    pub fn start(&mut self, frames: Arc<dyn FrameSource>) -> Result<Uuid> {
        self.detection.start(
            frames,
            Arc::clone(&self.classifier),
            Arc::clone(&self.chat) as _,
        )
    }

    /// Back to the initial screen: stop detection, clear the conversation,
    /// lock input. Detection resumes only on the next [`start`](Self::start).
    ///
    /// The loop has exited before the chat is cleared, so no transition can
    /// reach the chat controller afterwards.
    pub async fn reset(&mut self) {
        self.detection.stop().await;
        self.chat.reset().await;
    }

    /// Stop detection and lock input. The conversation is kept.
    pub async fn stop(&mut self) {
        self.detection.stop().await;
        self.chat.disable_input("detection stopped");
    }

    /// Forward a user message to the chat controller.
    pub async fn send(&self, text: &str) -> SendOutcome {
        self.chat.send(text).await
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn chat(&self) -> &Arc<ChatController> {
        &self.chat
    }

    pub fn detection(&self) -> &DetectionSession {
        &self.detection
    }
}
