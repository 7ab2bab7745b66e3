//! Bounded FIFO window of recent labels.

use std::collections::VecDeque;

use emo_emotion::Emotion;

use crate::constants::HISTORY_CAPACITY;

/// Recent non-sentinel labels, oldest first.
#[derive(Debug, Clone)]
pub struct History {
    labels: VecDeque<Emotion>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl History {
    /// Window of [`HISTORY_CAPACITY`] labels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Window of `capacity` labels. Zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            labels: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a label, evicting the oldest once over capacity.
    ///
    /// Sentinel labels are rejected and `false` is returned.
    pub fn push(&mut self, label: Emotion) -> bool {
        if label.is_sentinel() {
            return false;
        }
        self.labels.push_back(label);
        if self.labels.len() > self.capacity {
            self.labels.pop_front();
        }
        true
    }

    /// Labels currently held, at most [`capacity`](Self::capacity).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Emotion> + '_ {
        self.labels.iter().copied()
    }

    /// Forget every label. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.labels.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_oldest_first() {
        let mut history = History::with_capacity(3);
        history.push(Emotion::Angry);
        history.push(Emotion::Happy);
        history.push(Emotion::Sad);
        history.push(Emotion::Fear);

        let labels: Vec<_> = history.iter().collect();
        assert_eq!(labels, vec![Emotion::Happy, Emotion::Sad, Emotion::Fear]);
    }

    #[test]
    fn test_rejects_sentinels() {
        let mut history = History::new();
        assert!(!history.push(Emotion::NoFace));
        assert!(!history.push(Emotion::Error));
        assert!(history.is_empty());
        assert!(history.push(Emotion::Neutral));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_default_capacity() {
        let mut history = History::new();
        for _ in 0..40 {
            history.push(Emotion::Happy);
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
    }
}
