//! Classifier-side collaborator of the stabilizer.
//!
//! Turns camera frames into [`Sample`]s. Whatever goes wrong here (timeouts,
//! transport errors, bad payloads) is surfaced to the caller as an `error`
//! sentinel sample by [`classify_or_sentinel`], so a failed call still counts
//! as a tick.

mod client;
mod error;
mod frame;
mod types;

pub use client::{HttpClassifier, DEFAULT_CLASSIFIER_TIMEOUT, DEFAULT_CLASSIFIER_URL};
pub use error::{ClassifierError, Result};
pub use frame::{Frame, FrameSource, NullFrameSource, StaticFrameSource};
pub use types::{DetectRequest, DetectResponse};

use async_trait::async_trait;
use emo_emotion::Sample;

/// Anything that can label a frame.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn classify(&self, frame: &Frame) -> Result<Sample>;
}

/// Classify `frame`, mapping any failure to an `error` sentinel sample.
pub async fn classify_or_sentinel<C>(classifier: &C, frame: &Frame) -> Sample
where
    C: EmotionClassifier + ?Sized,
{
    match classifier.classify(frame).await {
        Ok(sample) => sample,
        Err(e) if e.is_timeout() => {
            tracing::warn!(classifier = classifier.name(), "classifier timed out: {}", e);
            Sample::error()
        }
        Err(e) => {
            tracing::warn!(classifier = classifier.name(), "classification failed: {}", e);
            Sample::error()
        }
    }
}
