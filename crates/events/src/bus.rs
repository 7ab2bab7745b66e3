//! Publishing side of the event contracts.
//!
//! Producers only see [`EventBus`]. A front-end implements it to forward
//! payloads; tests and headless runs use [`InMemoryEventBus`] and read the
//! recording back.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;

pub trait EventBus: Send + Sync {
    /// Deliver `payload` to whoever listens on `topic`. Must not block.
    fn emit(&self, topic: &str, payload: serde_json::Value);
}

pub type EventBusRef = Arc<dyn EventBus>;

/// Publish a typed event. A payload that fails to serialize is logged and
/// never reaches the bus.
pub fn emit_event<T: Serialize>(bus: &dyn EventBus, topic: &str, event: &T) {
    match serde_json::to_value(event) {
        Ok(payload) => bus.emit(topic, payload),
        Err(e) => tracing::warn!(topic, "dropping unserializable event: {}", e),
    }
}

/// One entry of an [`InMemoryEventBus`] recording.
#[derive(Debug, Clone)]
pub struct RecordedEvent {
    /// Position in the recording, starting at 0.
    pub seq: usize,
    pub topic: String,
    pub payload: serde_json::Value,
}

/// Keeps every published event in order.
#[derive(Default)]
pub struct InMemoryEventBus {
    recording: Mutex<Vec<RecordedEvent>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn recording(&self) -> MutexGuard<'_, Vec<RecordedEvent>> {
        self.recording
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.recording().clone()
    }

    pub fn events_for(&self, topic: &str) -> Vec<RecordedEvent> {
        self.recording()
            .iter()
            .filter(|e| e.topic == topic)
            .cloned()
            .collect()
    }

    /// Payloads on `topic` decoded as `T`. Payloads of another shape are skipped.
    pub fn payloads_for<T: DeserializeOwned>(&self, topic: &str) -> Vec<T> {
        self.events_for(topic)
            .into_iter()
            .filter_map(|e| serde_json::from_value(e.payload).ok())
            .collect()
    }

    /// Most recent payload on `topic`, if any decodes as `T`.
    pub fn last_for<T: DeserializeOwned>(&self, topic: &str) -> Option<T> {
        self.recording()
            .iter()
            .rev()
            .filter(|e| e.topic == topic)
            .find_map(|e| serde_json::from_value(e.payload.clone()).ok())
    }

    pub fn clear(&self) {
        self.recording().clear();
    }

    pub fn len(&self) -> usize {
        self.recording().len()
    }

    pub fn is_empty(&self) -> bool {
        self.recording().is_empty()
    }
}

impl EventBus for InMemoryEventBus {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        let mut recording = self.recording();
        let seq = recording.len();
        recording.push(RecordedEvent {
            seq,
            topic: topic.to_string(),
            payload,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Tick {
        label: String,
        progress: f64,
    }

    #[test]
    fn test_recording_keeps_order_across_topics() {
        let bus = InMemoryEventBus::new();
        bus.emit("emotion:sample", json!({"label": "happy", "progress": 0.1}));
        bus.emit("chat:input_state", json!({"enabled": true}));
        bus.emit("emotion:sample", json!({"label": "sad", "progress": 0.0}));

        let seqs: Vec<_> = bus.events().iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);

        let samples = bus.events_for("emotion:sample");
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].seq, 2);
        assert!(bus.events_for("chat:message").is_empty());
    }

    #[test]
    fn test_payloads_skip_other_shapes() {
        let bus = InMemoryEventBus::new();
        emit_event(
            &bus,
            "emotion:sample",
            &Tick {
                label: "fear".into(),
                progress: 0.33,
            },
        );
        bus.emit("emotion:sample", json!({"unexpected": 1}));

        let ticks: Vec<Tick> = bus.payloads_for("emotion:sample");
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].label, "fear");
    }

    #[test]
    fn test_last_for_returns_newest() {
        let bus = InMemoryEventBus::new();
        assert!(bus.last_for::<Tick>("emotion:sample").is_none());

        for (label, progress) in [("angry", 0.2), ("neutral", 0.5)] {
            emit_event(
                &bus,
                "emotion:sample",
                &Tick {
                    label: label.into(),
                    progress,
                },
            );
        }
        bus.emit("chat:thinking", json!({"thinking": true}));

        let last: Tick = bus.last_for("emotion:sample").unwrap();
        assert_eq!(last.label, "neutral");
    }

    #[test]
    fn test_clear_restarts_sequence() {
        let bus = InMemoryEventBus::new();
        bus.emit("chat:message", json!({"text": "hi"}));
        bus.clear();
        assert!(bus.is_empty());

        bus.emit("chat:message", json!({"text": "again"}));
        assert_eq!(bus.len(), 1);
        assert_eq!(bus.events()[0].seq, 0);
    }
}
