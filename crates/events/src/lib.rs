//! Shared event contracts between the detection loop, the chat controller and
//! whatever front-end is listening.
//!
//! Using shared types keeps producers and consumers agreeing on field names.

mod bus;

pub use bus::{emit_event, EventBus, EventBusRef, InMemoryEventBus, RecordedEvent};

use std::collections::BTreeMap;

use emo_emotion::{Emotion, Sample};
use emo_stabilizer::{StableStateChanged, Stabilizer};
use serde::{Deserialize, Serialize};

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Emitted on every tick that produced a sample.
///
/// Producers: detection loop
/// Consumers: front-end (current label, per-class bars, progress bar)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleObservedEvent {
    pub label: Emotion,
    pub display_name: String,
    pub color: String,
    pub confidence: f64,
    pub confidence_text: String,
    /// Scores for the seven non-sentinel classes, keyed by wire name.
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
    /// Accumulator level as a fraction of the cap.
    pub progress: f64,
    pub status_text: String,
    pub phase: String,
    #[serde(default)]
    pub stable: Option<Emotion>,
    #[serde(default)]
    pub timestamp_ms: i64,
}

impl SampleObservedEvent {
    /// Snapshot of `stabilizer` right after it ingested `sample`.
    pub fn new(sample: &Sample, stabilizer: &Stabilizer) -> Self {
        let label = sample.emotion();
        let scores = Emotion::CLASSES
            .iter()
            .map(|e| (e.as_str().to_string(), sample.score(*e)))
            .collect();

        Self {
            label,
            display_name: label.display_name().to_string(),
            color: label.color().to_string(),
            confidence: sample.confidence(),
            confidence_text: sample.confidence_text(),
            scores,
            progress: stabilizer.progress(),
            status_text: stabilizer.status_text(),
            phase: stabilizer.phase().name().to_string(),
            stable: stabilizer.current_stable(),
            timestamp_ms: now_ms(),
        }
    }
}

/// Emitted when a new label becomes stable.
///
/// Producers: detection loop
/// Consumers: chat controller, front-end (status line, input lock)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StableEmotionChangedEvent {
    pub label: Emotion,
    pub display_name: String,
    pub is_first_ever_stable: bool,
    /// Whether the chat input should accept messages.
    pub input_enabled: bool,
    pub status_text: String,
    #[serde(default)]
    pub timestamp_ms: i64,
}

impl From<&StableStateChanged> for StableEmotionChangedEvent {
    fn from(event: &StableStateChanged) -> Self {
        let label = event.new_label;
        let status_text = if label == Emotion::NoFace {
            "No face detected".to_string()
        } else {
            format!("Detected emotion: {}", label.display_name())
        };

        Self {
            label,
            display_name: label.display_name().to_string(),
            is_first_ever_stable: event.is_first_ever_stable,
            input_enabled: label != Emotion::NoFace,
            status_text,
            timestamp_ms: now_ms(),
        }
    }
}

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// Emitted when a message is added to the conversation.
///
/// Producers: chat controller
/// Consumers: front-end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageEvent {
    pub role: ChatRole,
    pub text: String,
    /// True when the reply came from the local fallback table.
    #[serde(default)]
    pub fallback: bool,
    #[serde(default)]
    pub timestamp_ms: i64,
}

impl ChatMessageEvent {
    pub fn new(role: ChatRole, text: impl Into<String>, fallback: bool) -> Self {
        Self {
            role,
            text: text.into(),
            fallback,
            timestamp_ms: now_ms(),
        }
    }
}

/// Emitted when the chat input is locked or unlocked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatInputStateEvent {
    pub enabled: bool,
    pub reason: String,
}

/// Emitted while an assistant reply is being generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatThinkingEvent {
    pub thinking: bool,
}

/// Detection loop lifecycle. `Reset` clears the evidence while the loop
/// keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionStatus {
    Started,
    Reset,
    Stopped,
}

/// Emitted when the detection loop starts, resets or stops.
///
/// Producers: detection session
/// Consumers: front-end (start/reset buttons, status line)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionStatusEvent {
    pub session_id: String,
    pub status: DetectionStatus,
    pub status_text: String,
    #[serde(default)]
    pub timestamp_ms: i64,
}

impl DetectionStatusEvent {
    pub fn new(session_id: impl Into<String>, status: DetectionStatus) -> Self {
        let status_text = match status {
            DetectionStatus::Started | DetectionStatus::Reset => "Detecting emotions...",
            DetectionStatus::Stopped => "Ready to detect emotions",
        };

        Self {
            session_id: session_id.into(),
            status,
            status_text: status_text.to_string(),
            timestamp_ms: now_ms(),
        }
    }
}

/// Event names as constants to prevent typos.
pub mod event_names {
    /// Per-tick sample and progress.
    pub const SAMPLE_OBSERVED: &str = "emotion:sample";
    /// Stable label transition.
    pub const STABLE_CHANGED: &str = "emotion:stable_changed";
    /// Detection loop status ("started", "stopped", "reset").
    pub const DETECTION_STATUS: &str = "emotion:detection_status";
    /// Chat message added.
    pub const CHAT_MESSAGE: &str = "chat:message";
    /// Assistant reply in flight ("EMO AI is thinking...").
    pub const CHAT_THINKING: &str = "chat:thinking";
    /// Chat input locked/unlocked.
    pub const CHAT_INPUT_STATE: &str = "chat:input_state";
}
