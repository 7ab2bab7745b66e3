//! Wire format of the classifier service.

use std::collections::HashMap;

use emo_emotion::{Emotion, Sample};
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};

/// Request body for `POST /api/detect_emotion`.
#[derive(Debug, Clone, Serialize)]
pub struct DetectRequest {
    /// Frame as a data URL.
    pub image: String,
}

/// Response body from the classifier service.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectResponse {
    #[serde(default)]
    pub emotion: Option<String>,
    #[serde(default)]
    pub confidence: f64,
    /// Per-class scores keyed by wire name.
    #[serde(default)]
    pub emotions: HashMap<String, f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl DetectResponse {
    /// Convert into a sample. Unknown score keys are skipped.
    pub fn into_sample(self) -> Result<Sample> {
        if let Some(message) = self.error {
            return Err(ClassifierError::Service(message));
        }

        let label = self
            .emotion
            .ok_or_else(|| ClassifierError::InvalidResponse("missing 'emotion'".to_string()))?;
        let emotion: Emotion = label
            .parse()
            .map_err(|_| ClassifierError::UnknownLabel(label.clone()))?;

        let scores = self.emotions.into_iter().filter_map(|(name, score)| {
            match name.parse::<Emotion>() {
                Ok(e) => Some((e, score)),
                Err(_) => {
                    tracing::debug!(name = %name, "ignoring unknown score key");
                    None
                }
            }
        });

        Ok(Sample::new(emotion, self.confidence).with_scores(scores))
    }
}
