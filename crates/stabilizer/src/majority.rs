//! Majority vote over the history window.

use emo_emotion::Emotion;
use serde::{Deserialize, Serialize};

use crate::history::History;

/// Most frequent label in the window and its share.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Majority {
    pub label: Emotion,
    pub count: usize,
    pub share: f64,
}

impl Majority {
    /// Vote over `history`. Returns `None` for an empty window.
    ///
    /// Ties go to the label declared first in [`Emotion::ALL`], so the result
    /// does not depend on insertion order.
    pub fn of(history: &History) -> Option<Self> {
        if history.is_empty() {
            return None;
        }

        let mut counts = [0usize; Emotion::ALL.len()];
        for label in history.iter() {
            counts[label.index()] += 1;
        }

        let mut best: Option<(Emotion, usize)> = None;
        for label in Emotion::ALL {
            let count = counts[label.index()];
            if count == 0 {
                continue;
            }
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((label, count)),
            }
        }

        best.map(|(label, count)| Majority {
            label,
            count,
            share: count as f64 / history.len() as f64,
        })
    }

    /// Whether the share reaches `threshold`.
    pub fn is_consistent(&self, threshold: f64) -> bool {
        self.share >= threshold
    }
}
