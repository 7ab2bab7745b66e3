//! Hysteresis accumulator.

use crate::constants::{ACCUMULATOR_CAP, ACCUMULATOR_STEP_DOWN, ACCUMULATOR_STEP_UP};

/// Evidence level for the current majority, always within `[0, ACCUMULATOR_CAP]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    level: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    /// One consistent tick.
    pub fn rise(&mut self) {
        self.level = (self.level + ACCUMULATOR_STEP_UP).min(ACCUMULATOR_CAP);
    }

    /// One inconsistent tick.
    pub fn decay(&mut self) {
        self.level = (self.level - ACCUMULATOR_STEP_DOWN).max(0.0);
    }

    pub fn is_pinned(&self) -> bool {
        self.level >= ACCUMULATOR_CAP
    }

    /// Level as a fraction of the cap, for progress bars.
    pub fn ratio(&self) -> f64 {
        self.level / ACCUMULATOR_CAP
    }

    pub fn reset(&mut self) {
        self.level = 0.0;
    }
}
