//! Stabilizer wired to the event bus.

use emo_emotion::Sample;
use emo_events::{
    emit_event, event_names, EventBusRef, SampleObservedEvent, StableEmotionChangedEvent,
};
use emo_stabilizer::{StableStateChanged, Stabilizer};

/// Owns the [`Stabilizer`] for one detection run and publishes a
/// [`SampleObservedEvent`] for every sample it sees, plus a
/// [`StableEmotionChangedEvent`] on each transition.
///
/// Not thread-safe on its own; the detection loop is its only user.
pub struct Detector {
    stabilizer: Stabilizer,
    bus: EventBusRef,
}

impl Detector {
    pub fn new(bus: EventBusRef) -> Self {
        Self {
            stabilizer: Stabilizer::new(),
            bus,
        }
    }

    /// Ingest one sample and publish the resulting state.
    pub fn observe(&mut self, sample: Sample) -> Option<StableStateChanged> {
        let transition = self.stabilizer.ingest(sample.clone());

        emit_event(
            self.bus.as_ref(),
            event_names::SAMPLE_OBSERVED,
            &SampleObservedEvent::new(&sample, &self.stabilizer),
        );

        if let Some(event) = &transition {
            tracing::info!(
                label = %event.new_label,
                first = event.is_first_ever_stable,
                "stable emotion detected"
            );
            emit_event(
                self.bus.as_ref(),
                event_names::STABLE_CHANGED,
                &StableEmotionChangedEvent::from(event),
            );
        }

        transition
    }

    pub fn reset(&mut self) {
        self.stabilizer.reset();
    }

    pub fn stabilizer(&self) -> &Stabilizer {
        &self.stabilizer
    }
}
