//! Example: Replay a scripted classifier stream through a full session.
//!
//! Run with: cargo run -p emo-session --example replay
//!
//! No camera or services needed. The chat backend is offline, so replies come
//! from the local fallback table.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use emo_chat::{ChatBackend, ChatError, ChatRequest};
use emo_classifier::{EmotionClassifier, Frame, StaticFrameSource};
use emo_emotion::{Emotion, Sample};
use emo_events::{event_names, EventBus};
use emo_session::{EmoSession, SessionSettings};

/// Prints every event as one line of JSON.
struct PrintingBus;

impl EventBus for PrintingBus {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        if topic == event_names::SAMPLE_OBSERVED {
            println!(
                "{:<24} {:<10} {}",
                topic,
                payload["label"].as_str().unwrap_or("?"),
                payload["status_text"].as_str().unwrap_or("")
            );
        } else {
            println!("{:<24} {}", topic, payload);
        }
    }
}

/// Happy for a while, a face drop-out, then sad.
struct Replay {
    script: Mutex<VecDeque<Emotion>>,
}

impl Replay {
    fn new() -> Self {
        let script = std::iter::repeat(Emotion::Happy)
            .take(16)
            .chain(std::iter::repeat(Emotion::NoFace).take(3))
            .chain(std::iter::repeat(Emotion::Sad).take(14))
            .collect();
        Self {
            script: Mutex::new(script),
        }
    }
}

#[async_trait]
impl EmotionClassifier for Replay {
    fn name(&self) -> &'static str {
        "replay"
    }

    async fn classify(&self, _frame: &Frame) -> emo_classifier::Result<Sample> {
        let next = self
            .script
            .lock()
            .map_err(|_| emo_classifier::ClassifierError::Request("script poisoned".into()))?
            .pop_front();

        Ok(match next {
            Some(Emotion::NoFace) | None => Sample::no_face(),
            Some(label) => Sample::new(label, 75.0),
        })
    }
}

struct Offline;

#[async_trait]
impl ChatBackend for Offline {
    async fn complete(&self, _request: &ChatRequest) -> emo_chat::Result<String> {
        Err(ChatError::Request("offline".to_string()))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("emo_session=info,emo_stabilizer=debug")
        .init();

    println!("=== Emotion Session Replay ===\n");

    let settings = SessionSettings {
        tick_ms: 100,
        send_cooldown_ms: 0,
        ..SessionSettings::from_env()?
    };

    let mut session = EmoSession::with_parts(
        settings,
        Arc::new(PrintingBus),
        Arc::new(Replay::new()),
        Arc::new(Offline),
    );

    let frames = Arc::new(StaticFrameSource::new(Frame::from_jpeg(vec![0xff, 0xd8])));
    session.start(frames)?;

    tokio::time::sleep(Duration::from_millis(2_000)).await;
    let outcome = session.send("Today went really well!").await;
    println!("\nsend -> {:?}\n", outcome);

    tokio::time::sleep(Duration::from_millis(2_000)).await;
    session.stop().await;

    println!("\nConversation:");
    for message in session.chat().service().history().await {
        println!("  {:?}: {}", message.role, message.content);
    }

    Ok(())
}
