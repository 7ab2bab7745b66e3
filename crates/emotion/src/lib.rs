//! Emotion vocabulary shared by every crate in the workspace.
//!
//! - `Emotion` - the closed label set, including the `no_face` and `error` sentinels
//! - `Sample` - one classifier result (label, confidence, per-class scores)

mod label;
mod sample;

pub use label::{Emotion, UnknownEmotion};
pub use sample::{Sample, MAX_SCORE};
