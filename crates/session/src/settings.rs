//! Session settings.

use std::time::Duration;

use emo_chat::{DEFAULT_CHAT_TIMEOUT, DEFAULT_CHAT_URL};
use emo_classifier::{DEFAULT_CLASSIFIER_TIMEOUT, DEFAULT_CLASSIFIER_URL};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TICK: Duration = Duration::from_secs(1);
pub const DEFAULT_SEND_COOLDOWN: Duration = Duration::from_secs(3);

pub const ENV_CLASSIFIER_URL: &str = "EMO_CLASSIFIER_URL";
pub const ENV_CLASSIFIER_TIMEOUT_MS: &str = "EMO_CLASSIFIER_TIMEOUT_MS";
pub const ENV_CHAT_URL: &str = "EMO_CHAT_URL";
pub const ENV_CHAT_TIMEOUT_MS: &str = "EMO_CHAT_TIMEOUT_MS";
pub const ENV_TICK_MS: &str = "EMO_TICK_MS";
pub const ENV_SEND_COOLDOWN_MS: &str = "EMO_SEND_COOLDOWN_MS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{key} must be a whole number of milliseconds, got '{value}'")]
    InvalidNumber { key: String, value: String },

    #[error("{key} must be greater than zero")]
    ZeroDuration { key: String },
}

/// Plumbing knobs for one session. Stabilizer thresholds are not here; they
/// are fixed constants of `emo-stabilizer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub tick_ms: u64,
    pub classifier_url: String,
    pub classifier_timeout_ms: u64,
    pub chat_url: String,
    pub chat_timeout_ms: u64,
    pub send_cooldown_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK.as_millis() as u64,
            classifier_url: DEFAULT_CLASSIFIER_URL.to_string(),
            classifier_timeout_ms: DEFAULT_CLASSIFIER_TIMEOUT.as_millis() as u64,
            chat_url: DEFAULT_CHAT_URL.to_string(),
            chat_timeout_ms: DEFAULT_CHAT_TIMEOUT.as_millis() as u64,
            send_cooldown_ms: DEFAULT_SEND_COOLDOWN.as_millis() as u64,
        }
    }
}

impl SessionSettings {
    /// Defaults overridden from the process environment, after loading `.env`
    /// if one exists.
    pub fn from_env() -> Result<Self, SettingsError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(url) = lookup(ENV_CLASSIFIER_URL) {
            settings.classifier_url = url;
        }
        if let Some(url) = lookup(ENV_CHAT_URL) {
            settings.chat_url = url;
        }

        let millis = |key: &str, current: u64| -> Result<u64, SettingsError> {
            match lookup(key) {
                None => Ok(current),
                Some(raw) => raw.trim().parse().map_err(|_| SettingsError::InvalidNumber {
                    key: key.to_string(),
                    value: raw,
                }),
            }
        };

        settings.tick_ms = millis(ENV_TICK_MS, settings.tick_ms)?;
        settings.classifier_timeout_ms =
            millis(ENV_CLASSIFIER_TIMEOUT_MS, settings.classifier_timeout_ms)?;
        settings.chat_timeout_ms = millis(ENV_CHAT_TIMEOUT_MS, settings.chat_timeout_ms)?;
        settings.send_cooldown_ms = millis(ENV_SEND_COOLDOWN_MS, settings.send_cooldown_ms)?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject zero durations. The send cooldown may be zero.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (key, value) in [
            (ENV_TICK_MS, self.tick_ms),
            (ENV_CLASSIFIER_TIMEOUT_MS, self.classifier_timeout_ms),
            (ENV_CHAT_TIMEOUT_MS, self.chat_timeout_ms),
        ] {
            if value == 0 {
                return Err(SettingsError::ZeroDuration {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn classifier_timeout(&self) -> Duration {
        Duration::from_millis(self.classifier_timeout_ms)
    }

    pub fn chat_timeout(&self) -> Duration {
        Duration::from_millis(self.chat_timeout_ms)
    }

    pub fn send_cooldown(&self) -> Duration {
        Duration::from_millis(self.send_cooldown_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = SessionSettings::default();
        assert_eq!(settings.tick(), Duration::from_secs(1));
        assert_eq!(settings.classifier_timeout(), Duration::from_secs(10));
        assert_eq!(settings.send_cooldown(), Duration::from_secs(3));
        assert_eq!(settings.chat_url, "http://localhost:3001/api/chat");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let settings = SessionSettings::from_lookup(lookup(&[
            (ENV_CLASSIFIER_URL, "http://10.0.0.2:5000/api/detect_emotion"),
            (ENV_TICK_MS, " 500 "),
            (ENV_SEND_COOLDOWN_MS, "0"),
        ]))
        .unwrap();

        assert_eq!(settings.classifier_url, "http://10.0.0.2:5000/api/detect_emotion");
        assert_eq!(settings.tick(), Duration::from_millis(500));
        assert_eq!(settings.send_cooldown(), Duration::ZERO);
        assert_eq!(settings.chat_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_number() {
        let err = SessionSettings::from_lookup(lookup(&[(ENV_CHAT_TIMEOUT_MS, "30s")])).unwrap_err();
        assert_eq!(
            err,
            SettingsError::InvalidNumber {
                key: ENV_CHAT_TIMEOUT_MS.to_string(),
                value: "30s".to_string(),
            }
        );
    }

    #[test]
    fn test_zero_tick_rejected() {
        let err = SessionSettings::from_lookup(lookup(&[(ENV_TICK_MS, "0")])).unwrap_err();
        assert!(matches!(err, SettingsError::ZeroDuration { key } if key == ENV_TICK_MS));
    }

    #[test]
    fn test_partial_json() {
        let settings: SessionSettings = serde_json::from_str(r#"{"tick_ms": 250}"#).unwrap();
        assert_eq!(settings.tick_ms, 250);
        assert_eq!(settings.classifier_timeout_ms, 10_000);
    }
}
