//! Stable-emotion detection for a noisy per-second classifier stream.
//!
//! # Architecture
//!
//! ```text
//! Sample ──▶ History (FIFO, 15, sentinels skipped)
//!                │
//!                ▼
//!            Majority (count / len, fixed tie-break order)
//!                │  share >= 0.6 ? rise(+0.33) : decay(-0.2)
//!                ▼
//!            Accumulator [0, 3] ──▶ pinned + new label ──▶ StableStateChanged
//! ```
//!
//! The crate is pure: no I/O, no clocks, no threads. Callers own the tick
//! timer and dispatch side effects from the returned event.
//!
//! # Example
//!
//! ```
//! use emo_emotion::{Emotion, Sample};
//! use emo_stabilizer::Stabilizer;
//!
//! let mut stabilizer = Stabilizer::new();
//! let events: Vec<_> = (0..20)
//!     .filter_map(|_| stabilizer.ingest(Sample::new(Emotion::Happy, 92.0)))
//!     .collect();
//!
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].new_label, Emotion::Happy);
//! assert!(events[0].is_first_ever_stable);
//! ```

mod accumulator;
mod constants;
mod history;
mod majority;
mod stabilizer;

pub use accumulator::Accumulator;
pub use constants::*;
pub use history::History;
pub use majority::Majority;
pub use stabilizer::{Phase, StableStateChanged, Stabilizer, StabilizerState};
