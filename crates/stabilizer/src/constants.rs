/// Maximum number of labels kept in the voting window.
pub const HISTORY_CAPACITY: usize = 15;

/// Labels required in the window before stability is evaluated.
pub const MIN_SAMPLES: usize = 5;

/// Share of the window the majority label must hold to count as consistent.
pub const MAJORITY_THRESHOLD: f64 = 0.6;

/// Accumulator gain per consistent tick.
pub const ACCUMULATOR_STEP_UP: f64 = 0.33;

/// Accumulator loss per inconsistent tick.
pub const ACCUMULATOR_STEP_DOWN: f64 = 0.2;

/// Accumulator ceiling; reaching it accepts the majority label as stable.
/// Unit is seconds-equivalent at one tick per second.
pub const ACCUMULATOR_CAP: f64 = 3.0;
