//! Emotion label definitions.
//!
//! Pure domain logic - no I/O.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Categorical output of the emotion classifier.
///
/// Declaration order is significant: it is the fixed total order used to
/// break ties in the majority vote (earlier wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    Neutral,

    /// Sentinel: no face in the frame.
    NoFace,

    /// Sentinel: the classifier call failed or timed out.
    Error,
}

/// Returned when a wire name does not match any label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown emotion label '{0}'")]
pub struct UnknownEmotion(pub String);

impl Emotion {
    /// Every label, in tie-break order.
    pub const ALL: [Emotion; 9] = [
        Emotion::Angry,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprise,
        Emotion::Neutral,
        Emotion::NoFace,
        Emotion::Error,
    ];

    /// The seven labels that carry a usable classification.
    pub const CLASSES: [Emotion; 7] = [
        Emotion::Angry,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    /// Position in [`Emotion::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// `no_face` and `error` mean "no usable classification this tick".
    pub fn is_sentinel(self) -> bool {
        matches!(self, Emotion::NoFace | Emotion::Error)
    }

    /// Wire name as sent by the classifier service.
    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Angry => "angry",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
            Emotion::NoFace => "no_face",
            Emotion::Error => "error",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Emotion::Angry => "Angry",
            Emotion::Disgust => "Disgust",
            Emotion::Fear => "Fear",
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Surprise => "Surprise",
            Emotion::Neutral => "Neutral",
            Emotion::NoFace => "No Face Detected",
            Emotion::Error => "Detection Error",
        }
    }

    /// Hex color used by front-ends for this label.
    pub fn color(self) -> &'static str {
        match self {
            Emotion::Angry => "#ff4757",
            Emotion::Disgust => "#2ed573",
            Emotion::Fear => "#a55eea",
            Emotion::Happy => "#fbc531",
            Emotion::Sad => "#3498db",
            Emotion::Surprise => "#ff9f43",
            Emotion::Neutral | Emotion::NoFace => "#dfe6e9",
            Emotion::Error => "#ff4757",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Emotion::ALL
            .iter()
            .copied()
            .find(|e| e.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownEmotion(s.to_string()))
    }
}
