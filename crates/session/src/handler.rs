use emo_stabilizer::StableStateChanged;

/// Receives stable-state transitions from the detection loop.
///
/// Called on the loop task. Implementations must return quickly and push any
/// slow work (network calls) onto their own tasks.
pub trait StableStateHandler: Send + Sync {
    fn on_stable_changed(&self, event: &StableStateChanged);
}

impl<F> StableStateHandler for F
where
    F: Fn(&StableStateChanged) + Send + Sync,
{
    fn on_stable_changed(&self, event: &StableStateChanged) {
        self(event)
    }
}

/// Handler that ignores every transition.
pub struct NullHandler;

impl StableStateHandler for NullHandler {
    fn on_stable_changed(&self, _event: &StableStateChanged) {}
}
