use emo_chat::ChatError;
use emo_classifier::ClassifierError;
use thiserror::Error;

use crate::settings::SettingsError;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Settings failed validation.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The classifier client could not be built.
    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    /// The chat client could not be built.
    #[error(transparent)]
    Chat(#[from] ChatError),

    /// `start` was called outside a tokio runtime.
    #[error("detection must be started from within a tokio runtime")]
    NoRuntime,
}
