//! Chat side effects of stable-state transitions.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use emo_chat::{greeting_prompt, ChatService};
use emo_emotion::Emotion;
use emo_events::{
    emit_event, event_names, ChatInputStateEvent, ChatMessageEvent, ChatRole, ChatThinkingEvent,
    EventBusRef,
};
use emo_stabilizer::StableStateChanged;
use tokio::runtime::Handle;
use tokio::time::Instant;

use crate::handler::StableStateHandler;

/// What happened to a message passed to [`ChatController::send`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Recorded; the reply is on its way.
    Sent,
    /// Blank after trimming.
    Empty,
    /// No stable emotion yet, or the stable label is `no_face`.
    InputDisabled,
    /// A previous message was sent less than the cooldown ago.
    CoolingDown,
}

#[derive(Debug, Default)]
struct ControllerState {
    stable: Option<Emotion>,
    input_enabled: bool,
    last_send: Option<Instant>,
}

/// Reacts to stable-state transitions on the chat side.
///
/// Unlocks input once an emotion is stable (and locks it again for `no_face`),
/// requests the one-time greeting, and rate-limits user messages. Replies are
/// generated on spawned tasks so the detection loop never waits on the backend.
pub struct ChatController {
    service: Arc<ChatService>,
    bus: EventBusRef,
    cooldown: Duration,
    state: Mutex<ControllerState>,
}

impl ChatController {
    pub fn new(service: Arc<ChatService>, bus: EventBusRef, cooldown: Duration) -> Self {
        Self {
            service,
            bus,
            cooldown,
            state: Mutex::new(ControllerState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Whether [`send`](Self::send) currently accepts messages.
    pub fn is_input_enabled(&self) -> bool {
        self.lock().input_enabled
    }

    /// Stable label the next reply will be conditioned on.
    pub fn stable(&self) -> Option<Emotion> {
        self.lock().stable
    }

    pub fn service(&self) -> &Arc<ChatService> {
        &self.service
    }

    /// Record a user message and request a reply in the background.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let message = text.trim();
        if message.is_empty() {
            return SendOutcome::Empty;
        }

        let stable = {
            let mut state = self.lock();
            if !state.input_enabled {
                return SendOutcome::InputDisabled;
            }
            if let Some(last) = state.last_send {
                if last.elapsed() < self.cooldown {
                    tracing::debug!("send ignored during cooldown");
                    return SendOutcome::CoolingDown;
                }
            }
            state.last_send = Some(Instant::now());
            state.stable
        };

        self.service.record_user(message).await;
        emit_event(
            self.bus.as_ref(),
            event_names::CHAT_MESSAGE,
            &ChatMessageEvent::new(ChatRole::User, message, false),
        );

        self.spawn_reply(message.to_string(), stable);
        SendOutcome::Sent
    }

    /// Lock the input until the next stable transition.
    pub fn disable_input(&self, reason: &str) {
        let changed = std::mem::replace(&mut self.lock().input_enabled, false);
        if changed {
            self.publish_input_state(false, reason);
        }
    }

    /// Clear the conversation and lock the input.
    pub async fn reset(&self) {
        *self.lock() = ControllerState::default();
        self.service.clear().await;
        self.publish_input_state(false, "reset");
    }

    fn publish_input_state(&self, enabled: bool, reason: &str) {
        emit_event(
            self.bus.as_ref(),
            event_names::CHAT_INPUT_STATE,
            &ChatInputStateEvent {
                enabled,
                reason: reason.to_string(),
            },
        );
    }

    fn spawn_reply(&self, message: String, stable: Option<Emotion>) {
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!("no tokio runtime, dropping chat request");
            return;
        };

        let service = Arc::clone(&self.service);
        let bus = Arc::clone(&self.bus);

        runtime.spawn(async move {
            emit_event(
                bus.as_ref(),
                event_names::CHAT_THINKING,
                &ChatThinkingEvent { thinking: true },
            );

            let reply = service.respond(&message, stable).await;

            emit_event(
                bus.as_ref(),
                event_names::CHAT_THINKING,
                &ChatThinkingEvent { thinking: false },
            );

            if reply.recorded {
                emit_event(
                    bus.as_ref(),
                    event_names::CHAT_MESSAGE,
                    &ChatMessageEvent::new(ChatRole::Assistant, reply.text, reply.fallback),
                );
            }
        });
    }
}

impl StableStateHandler for ChatController {
    fn on_stable_changed(&self, event: &StableStateChanged) {
        let label = event.new_label;
        let enabled = label != Emotion::NoFace;
        {
            let mut state = self.lock();
            state.stable = Some(label);
            state.input_enabled = enabled;
        }

        let reason = if enabled { "stable emotion" } else { "no face detected" };
        self.publish_input_state(enabled, reason);

        if event.is_first_ever_stable {
            tracing::debug!(label = %label, "requesting greeting");
            self.spawn_reply(greeting_prompt(label), Some(label));
        }
    }
}
