//! HTTP client for the emotion classification service.

use std::time::Duration;

use async_trait::async_trait;
use emo_emotion::Sample;
use reqwest::Client;

use crate::error::{ClassifierError, Result};
use crate::frame::Frame;
use crate::types::{DetectRequest, DetectResponse};
use crate::EmotionClassifier;

/// Default endpoint of the local classifier service.
pub const DEFAULT_CLASSIFIER_URL: &str = "http://localhost:5000/api/detect_emotion";

/// Default per-request timeout.
pub const DEFAULT_CLASSIFIER_TIMEOUT: Duration = Duration::from_secs(10);

/// Classifier backed by a remote HTTP service.
pub struct HttpClassifier {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpClassifier {
    /// Create a client for `endpoint` with a hard per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifierError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn map_transport(&self, e: reqwest::Error) -> ClassifierError {
        if e.is_timeout() {
            ClassifierError::Timeout {
                millis: self.timeout.as_millis() as u64,
            }
        } else {
            ClassifierError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl EmotionClassifier for HttpClassifier {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn classify(&self, frame: &Frame) -> Result<Sample> {
        let request = DetectRequest {
            image: frame.data_url(),
        };

        tracing::trace!(endpoint = %self.endpoint, bytes = frame.len(), "classifying frame");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: DetectResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.map_transport(e)
            } else {
                ClassifierError::InvalidResponse(e.to_string())
            }
        })?;

        body.into_sample()
    }
}
