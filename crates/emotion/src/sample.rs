//! One tick's classification result.

use crate::label::Emotion;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper bound for confidence and per-class scores (percent).
pub const MAX_SCORE: f64 = 100.0;

/// Classification result for a single frame.
///
/// Confidence and scores are percentages clamped into `[0, 100]`, including
/// when a sample is deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSample")]
pub struct Sample {
    emotion: Emotion,
    confidence: f64,
    #[serde(default)]
    scores: BTreeMap<Emotion, f64>,
}

/// Unchecked wire shape; converted through the clamping constructors.
#[derive(Deserialize)]
struct RawSample {
    emotion: Emotion,
    #[serde(default)]
    confidence: f64,
    #[serde(default)]
    scores: BTreeMap<Emotion, f64>,
}

impl From<RawSample> for Sample {
    fn from(raw: RawSample) -> Self {
        Sample::new(raw.emotion, raw.confidence).with_scores(raw.scores)
    }
}

/// One decimal place, exact halves rounded up (`87.25` -> `87.3`).
///
/// Only values whose fourth part is an odd integer sit exactly on a half in
/// binary; everything else is left to the standard formatter, which rounds
/// the exact decimal expansion.
fn format_tenths(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters.rem_euclid(2.0) == 1.0 {
        let tenths = (value * 10.0 + 0.5).floor();
        return format!("{:.1}", tenths / 10.0);
    }
    format!("{:.1}", value)
}

fn clamp_score(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, MAX_SCORE)
}

impl Sample {
    pub fn new(emotion: Emotion, confidence: f64) -> Self {
        Self {
            emotion,
            confidence: clamp_score(confidence),
            scores: BTreeMap::new(),
        }
    }

    /// Attach per-class scores. Values are clamped like the confidence.
    pub fn with_scores<I>(mut self, scores: I) -> Self
    where
        I: IntoIterator<Item = (Emotion, f64)>,
    {
        self.scores = scores
            .into_iter()
            .map(|(e, v)| (e, clamp_score(v)))
            .collect();
        self
    }

    /// Sentinel sample for a frame without a face.
    pub fn no_face() -> Self {
        Self::new(Emotion::NoFace, 0.0)
    }

    /// Sentinel sample for a failed or timed-out classification.
    pub fn error() -> Self {
        Self::new(Emotion::Error, 0.0)
    }

    pub fn emotion(&self) -> Emotion {
        self.emotion
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn scores(&self) -> &BTreeMap<Emotion, f64> {
        &self.scores
    }

    /// Score for one class, 0 when the classifier did not report it.
    pub fn score(&self, emotion: Emotion) -> f64 {
        self.scores.get(&emotion).copied().unwrap_or(0.0)
    }

    pub fn is_sentinel(&self) -> bool {
        self.emotion.is_sentinel()
    }

    /// Status line shown under the current label.
    pub fn confidence_text(&self) -> String {
        match self.emotion {
            Emotion::NoFace => "Please position your face in the camera".to_string(),
            Emotion::Error => "Detection error - try again".to_string(),
            _ => format!("{}% confidence", format_tenths(self.confidence)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(Sample::new(Emotion::Happy, 140.0).confidence(), 100.0);
        assert_eq!(Sample::new(Emotion::Happy, -3.0).confidence(), 0.0);
        assert_eq!(Sample::new(Emotion::Happy, f64::NAN).confidence(), 0.0);
    }

    #[test]
    fn test_scores_are_clamped() {
        let sample = Sample::new(Emotion::Sad, 80.0)
            .with_scores([(Emotion::Sad, 80.0), (Emotion::Fear, 120.0)]);
        assert_eq!(sample.score(Emotion::Sad), 80.0);
        assert_eq!(sample.score(Emotion::Fear), 100.0);
        assert_eq!(sample.score(Emotion::Happy), 0.0);
    }

    #[test]
    fn test_sentinel_constructors() {
        let nf = Sample::no_face();
        assert!(nf.is_sentinel());
        assert_eq!(nf.confidence(), 0.0);
        assert!(nf.scores().is_empty());
        assert_eq!(Sample::error().emotion(), Emotion::Error);
    }

    #[test]
    fn test_confidence_text() {
        assert_eq!(
            Sample::new(Emotion::Happy, 87.25).confidence_text(),
            "87.3% confidence"
        );
        assert_eq!(
            Sample::new(Emotion::Happy, 64.75).confidence_text(),
            "64.8% confidence"
        );
        assert_eq!(
            Sample::new(Emotion::Happy, 91.04).confidence_text(),
            "91.0% confidence"
        );
        assert_eq!(
            Sample::new(Emotion::Happy, 100.0).confidence_text(),
            "100.0% confidence"
        );
        assert_eq!(
            Sample::no_face().confidence_text(),
            "Please position your face in the camera"
        );
        assert_eq!(Sample::error().confidence_text(), "Detection error - try again");
    }

    #[test]
    fn test_deserialize_clamps() {
        let sample: Sample = serde_json::from_str(
            r#"{"emotion": "angry", "confidence": 140.0, "scores": {"angry": 250.0, "sad": -4.0}}"#,
        )
        .unwrap();
        assert_eq!(sample.confidence(), 100.0);
        assert_eq!(sample.score(Emotion::Angry), 100.0);
        assert_eq!(sample.score(Emotion::Sad), 0.0);
    }

    #[test]
    fn test_deserialize_defaults() {
        let sample: Sample = serde_json::from_str(r#"{"emotion": "no_face"}"#).unwrap();
        assert_eq!(sample, Sample::no_face());
    }
}
