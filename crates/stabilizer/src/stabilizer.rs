//! Temporal stabilization of a per-tick emotion stream.
//!
//! Each tick, the sample's label joins the voting window (unless it is a
//! sentinel). Once the window holds [`MIN_SAMPLES`] labels, the majority share
//! drives the accumulator: it rises while the majority holds at least
//! [`MAJORITY_THRESHOLD`] of the window and decays otherwise. A label becomes
//! stable on the tick the accumulator reaches the cap while that label is the
//! majority and differs from the current stable label.

use emo_emotion::{Emotion, Sample};
use serde::{Deserialize, Serialize};

use crate::accumulator::Accumulator;
use crate::constants::{ACCUMULATOR_CAP, MAJORITY_THRESHOLD, MIN_SAMPLES};
use crate::history::History;
use crate::majority::Majority;

/// Emitted once per transition of the stable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StableStateChanged {
    pub new_label: Emotion,
    /// True only on the first non-`no_face` transition of a session.
    pub is_first_ever_stable: bool,
}

/// Observable stage of the stabilizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Fewer than [`MIN_SAMPLES`] labels in the window.
    Warming { samples: usize },
    /// Collecting evidence for the current majority.
    Tracking { label: Emotion, level: f64 },
    /// Accumulator pinned at the cap on the current stable label.
    Stable { label: Emotion },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Warming { .. } => "warming",
            Phase::Tracking { .. } => "tracking",
            Phase::Stable { .. } => "stable",
        }
    }
}

/// Session state, owned by one [`Stabilizer`].
#[derive(Debug, Clone, Default)]
pub struct StabilizerState {
    history: History,
    accumulator: Accumulator,
    current_stable: Option<Emotion>,
    has_fired_initial_greeting: bool,
    majority: Option<Majority>,
    last_sample: Option<Sample>,
}

/// Debounces a noisy label stream into a stable-emotion signal.
///
/// Not reentrant; drive it from a single tick loop.
#[derive(Debug, Clone, Default)]
pub struct Stabilizer {
    state: StabilizerState,
}

impl Stabilizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one tick's sample.
    ///
    /// Returns an event only on the tick where a new label becomes stable.
    pub fn ingest(&mut self, sample: Sample) -> Option<StableStateChanged> {
        let state = &mut self.state;
        state.history.push(sample.emotion());
        state.last_sample = Some(sample);

        if state.history.len() < MIN_SAMPLES {
            state.majority = None;
            return None;
        }

        let majority = Majority::of(&state.history)?;
        state.majority = Some(majority);

        if !majority.is_consistent(MAJORITY_THRESHOLD) {
            state.accumulator.decay();
            tracing::trace!(
                label = %majority.label,
                share = majority.share,
                level = state.accumulator.level(),
                "majority below threshold"
            );
            return None;
        }

        state.accumulator.rise();
        tracing::trace!(
            label = %majority.label,
            share = majority.share,
            level = state.accumulator.level(),
            "majority consistent"
        );

        if !state.accumulator.is_pinned() || state.current_stable == Some(majority.label) {
            return None;
        }

        let is_first_ever_stable =
            !state.has_fired_initial_greeting && majority.label != Emotion::NoFace;
        if is_first_ever_stable {
            state.has_fired_initial_greeting = true;
        }

        tracing::debug!(
            from = ?state.current_stable,
            to = %majority.label,
            is_first_ever_stable,
            "stable emotion changed"
        );
        state.current_stable = Some(majority.label);

        Some(StableStateChanged {
            new_label: majority.label,
            is_first_ever_stable,
        })
    }

    /// Return to the initial state. Calling it repeatedly has no further effect.
    pub fn reset(&mut self) {
        self.state = StabilizerState::default();
    }

    pub fn current_stable(&self) -> Option<Emotion> {
        self.state.current_stable
    }

    pub fn has_fired_initial_greeting(&self) -> bool {
        self.state.has_fired_initial_greeting
    }

    /// Accumulator level in `[0, ACCUMULATOR_CAP]`.
    pub fn level(&self) -> f64 {
        self.state.accumulator.level()
    }

    /// Accumulator level as a fraction of the cap. Informational only.
    pub fn progress(&self) -> f64 {
        self.state.accumulator.ratio()
    }

    pub fn history(&self) -> &History {
        &self.state.history
    }

    /// Majority computed on the most recent evaluated tick.
    pub fn majority(&self) -> Option<Majority> {
        self.state.majority
    }

    /// Most recent sample, including sentinels and warm-up samples.
    pub fn last_sample(&self) -> Option<&Sample> {
        self.state.last_sample.as_ref()
    }

    pub fn phase(&self) -> Phase {
        let state = &self.state;
        match state.majority {
            _ if state.history.len() < MIN_SAMPLES => Phase::Warming {
                samples: state.history.len(),
            },
            Some(m) if state.accumulator.is_pinned() && state.current_stable == Some(m.label) => {
                Phase::Stable { label: m.label }
            }
            Some(m) => Phase::Tracking {
                label: m.label,
                level: state.accumulator.level(),
            },
            None => Phase::Warming {
                samples: state.history.len(),
            },
        }
    }

    /// Progress line for front-ends, e.g. `Detecting stable emotion (1.3s/3s)`.
    pub fn status_text(&self) -> String {
        format!(
            "Detecting stable emotion ({:.1}s/{}s)",
            self.level(),
            ACCUMULATOR_CAP
        )
    }
}
