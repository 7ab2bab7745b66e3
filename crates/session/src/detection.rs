//! Detection session - background task that samples the camera once per tick.

use std::sync::Arc;
use std::time::Duration;

use emo_classifier::{classify_or_sentinel, EmotionClassifier, FrameSource};
use emo_events::{emit_event, event_names, DetectionStatus, DetectionStatusEvent, EventBusRef};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::detector::Detector;
use crate::error::{Result, SessionError};
use crate::handler::StableStateHandler;

const CONTROL_CAPACITY: usize = 8;

/// Messages handled by the loop task.
#[derive(Debug)]
pub enum Control {
    /// Drop all accumulated evidence and start over. The sender is signalled
    /// once the stabilizer has been reset.
    Reset(oneshot::Sender<()>),
}

struct Running {
    id: Uuid,
    cancel: CancellationToken,
    control: mpsc::Sender<Control>,
    handle: JoinHandle<()>,
}

/// Owns the detection loop task.
///
/// One classifier call per tick, never overlapping. A tick that comes due
/// while a call is still in flight is skipped.
pub struct DetectionSession {
    tick: Duration,
    bus: EventBusRef,
    running: Option<Running>,
}

impl DetectionSession {
    /// Idle session. Nothing runs until [`start`](Self::start).
    pub fn new(tick: Duration, bus: EventBusRef) -> Self {
        Self {
            tick,
            bus,
            running: None,
        }
    }

    /// Spawn the loop. A second call while running logs and returns the
    /// current session id.
    pub fn start(
        &mut self,
        frames: Arc<dyn FrameSource>,
        classifier: Arc<dyn EmotionClassifier>,
        handler: Arc<dyn StableStateHandler>,
    ) -> Result<Uuid> {
        if let Some(running) = &self.running {
            if !running.handle.is_finished() {
                tracing::warn!(session = %running.id, "detection already running");
                return Ok(running.id);
            }
        }

        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;

        let id = Uuid::new_v4();
        let cancel = CancellationToken::new();
        let (control_tx, control_rx) = mpsc::channel(CONTROL_CAPACITY);

        let ctx = LoopContext {
            id,
            tick: self.tick,
            bus: Arc::clone(&self.bus),
            frames,
            classifier,
            handler,
            cancel: cancel.clone(),
        };
        let handle = runtime.spawn(run_loop(ctx, control_rx));

        emit_event(
            self.bus.as_ref(),
            event_names::DETECTION_STATUS,
            &DetectionStatusEvent::new(id.to_string(), DetectionStatus::Started),
        );

        self.running = Some(Running {
            id,
            cancel,
            control: control_tx,
            handle,
        });
        Ok(id)
    }

    /// Reset the loop's stabilizer and wait until it is done.
    ///
    /// A classification in flight when the reset arrives is discarded, so no
    /// transition from before the reset can be reported after this returns.
    /// Returns `false` when the loop is not running.
    pub async fn reset(&self) -> bool {
        let Some(running) = &self.running else {
            return false;
        };

        let (ack_tx, ack_rx) = oneshot::channel();
        if running.control.send(Control::Reset(ack_tx)).await.is_err() {
            tracing::warn!(session = %running.id, "detection loop gone, reset dropped");
            return false;
        }
        ack_rx.await.is_ok()
    }

    /// Cancel the loop and wait for it to exit.
    pub async fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };

        running.cancel.cancel();
        if let Err(e) = running.handle.await {
            tracing::warn!(session = %running.id, "detection task ended abnormally: {}", e);
        }

        emit_event(
            self.bus.as_ref(),
            event_names::DETECTION_STATUS,
            &DetectionStatusEvent::new(running.id.to_string(), DetectionStatus::Stopped),
        );
    }

    /// False once stopped, or if the task has exited on its own.
    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .map(|r| !r.handle.is_finished())
            .unwrap_or(false)
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.running.as_ref().map(|r| r.id)
    }
}

impl Drop for DetectionSession {
    fn drop(&mut self) {
        if let Some(running) = &self.running {
            running.cancel.cancel();
        }
    }
}

struct LoopContext {
    id: Uuid,
    tick: Duration,
    bus: EventBusRef,
    frames: Arc<dyn FrameSource>,
    classifier: Arc<dyn EmotionClassifier>,
    handler: Arc<dyn StableStateHandler>,
    cancel: CancellationToken,
}

async fn run_loop(ctx: LoopContext, mut control: mpsc::Receiver<Control>) {
    tracing::info!(session = %ctx.id, tick = ?ctx.tick, "detection started");

    let mut detector = Detector::new(Arc::clone(&ctx.bus));
    let mut interval = tokio::time::interval(ctx.tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => break,
            Some(message) = control.recv() => apply_control(&ctx, &mut detector, message),
            _ = interval.tick() => {
                let Some(frame) = ctx.frames.capture() else {
                    tracing::trace!(session = %ctx.id, "camera not ready, skipping tick");
                    continue;
                };

                let sample = tokio::select! {
                    biased;
                    _ = ctx.cancel.cancelled() => break,
                    Some(message) = control.recv() => {
                        tracing::debug!(session = %ctx.id, "discarding in-flight classification");
                        apply_control(&ctx, &mut detector, message);
                        continue;
                    }
                    sample = classify_or_sentinel(ctx.classifier.as_ref(), &frame) => sample,
                };

                if let Some(event) = detector.observe(sample) {
                    ctx.handler.on_stable_changed(&event);
                }
            }
        }
    }

    tracing::info!(session = %ctx.id, "detection stopped");
}

fn apply_control(ctx: &LoopContext, detector: &mut Detector, message: Control) {
    match message {
        Control::Reset(ack) => {
            detector.reset();
            tracing::debug!(session = %ctx.id, "detection reset");
            emit_event(
                ctx.bus.as_ref(),
                event_names::DETECTION_STATUS,
                &DetectionStatusEvent::new(ctx.id.to_string(), DetectionStatus::Reset),
            );
            let _ = ack.send(());
        }
    }
}
