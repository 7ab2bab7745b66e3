//! Application layer of the emotion session.
//!
//! # Architecture
//!
//! ```text
//! interval(tick) ──▶ FrameSource ──▶ EmotionClassifier ──▶ Detector (Stabilizer)
//!                                        (error sentinel        │
//!                                         on failure)           ├──▶ EventBus: emotion:sample
//!                                                               │
//!                                               StableStateChanged
//!                                                               ├──▶ EventBus: emotion:stable_changed
//!                                                               ▼
//!                                                      ChatController ──spawn──▶ ChatService
//! ```
//!
//! - `DetectionSession` owns the tick loop (one tokio task, cancelled through a
//!   `CancellationToken`)
//! - `ChatController` turns transitions into input locking and the one-time greeting
//! - `EmoSession` wires both from `SessionSettings`

mod app;
mod chat_controller;
mod detection;
mod detector;
mod error;
mod handler;
mod settings;

pub use app::EmoSession;
pub use chat_controller::{ChatController, SendOutcome};
pub use detection::{Control, DetectionSession};
pub use detector::Detector;
pub use error::{Result, SessionError};
pub use handler::{NullHandler, StableStateHandler};
pub use settings::{
    SessionSettings, SettingsError, DEFAULT_SEND_COOLDOWN, DEFAULT_TICK, ENV_CHAT_TIMEOUT_MS,
    ENV_CHAT_URL, ENV_CLASSIFIER_TIMEOUT_MS, ENV_CLASSIFIER_URL, ENV_SEND_COOLDOWN_MS, ENV_TICK_MS,
};
