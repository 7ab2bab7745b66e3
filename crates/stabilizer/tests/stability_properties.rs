//! Behavioural tests for the stabilizer over scripted label streams.

use emo_emotion::{Emotion, Sample};
use emo_stabilizer::{Phase, StableStateChanged, Stabilizer, ACCUMULATOR_CAP, MIN_SAMPLES};

/// Feed `labels` and return `(1-based tick, event)` for every emitted event.
fn run(stabilizer: &mut Stabilizer, labels: &[Emotion]) -> Vec<(usize, StableStateChanged)> {
    labels
        .iter()
        .enumerate()
        .filter_map(|(i, label)| {
            let sample = if label.is_sentinel() {
                Sample::new(*label, 0.0)
            } else {
                Sample::new(*label, 85.0)
            };
            stabilizer.ingest(sample).map(|e| (i + 1, e))
        })
        .collect()
}

fn repeat(label: Emotion, n: usize) -> Vec<Emotion> {
    vec![label; n]
}

// =============================================================================
// Warm-up
// =============================================================================

mod warm_up {
    use super::*;

    #[test]
    fn test_no_event_before_min_samples() {
        for label in Emotion::CLASSES {
            let mut s = Stabilizer::new();
            assert!(run(&mut s, &repeat(label, MIN_SAMPLES - 1)).is_empty());
            assert_eq!(s.level(), 0.0);
        }
    }

    #[test]
    fn test_sentinels_extend_warm_up() {
        let mut s = Stabilizer::new();
        let mut labels = repeat(Emotion::NoFace, 30);
        labels.extend(repeat(Emotion::Sad, 4));
        assert!(run(&mut s, &labels).is_empty());
        assert_eq!(s.phase(), Phase::Warming { samples: 4 });
    }
}

// =============================================================================
// Convergence and duplicate suppression
// =============================================================================

mod convergence {
    use super::*;

    #[test]
    fn test_constant_stream_fires_once_on_tick_fourteen() {
        let mut s = Stabilizer::new();
        let events = run(&mut s, &repeat(Emotion::Surprise, 14));
        assert_eq!(
            events,
            vec![(
                14,
                StableStateChanged {
                    new_label: Emotion::Surprise,
                    is_first_ever_stable: true,
                }
            )]
        );
    }

    #[test]
    fn test_no_duplicate_fires() {
        let mut s = Stabilizer::new();
        let events = run(&mut s, &repeat(Emotion::Happy, 500));
        assert_eq!(events.len(), 1);
        assert_eq!(s.current_stable(), Some(Emotion::Happy));
        assert_eq!(s.level(), ACCUMULATOR_CAP);
    }

    #[test]
    fn test_neutral_then_happy_scenario() {
        let mut s = Stabilizer::new();
        let mut labels = repeat(Emotion::Neutral, 5);
        labels.extend(repeat(Emotion::Happy, 15));

        let events = run(&mut s, &labels);
        assert_eq!(
            events,
            vec![(
                20,
                StableStateChanged {
                    new_label: Emotion::Happy,
                    is_first_ever_stable: true,
                }
            )]
        );

        // The remaining happy ticks stay quiet.
        assert!(run(&mut s, &repeat(Emotion::Happy, 30)).is_empty());
    }

    #[test]
    fn test_neutral_run_alone_never_fires() {
        let mut s = Stabilizer::new();
        let mut labels = repeat(Emotion::Neutral, 5);
        labels.extend(repeat(Emotion::Happy, 14));
        assert!(run(&mut s, &labels).is_empty());
        assert_eq!(s.current_stable(), None);
    }
}

// =============================================================================
// Flicker resistance
// =============================================================================

mod flicker {
    use super::*;

    #[test]
    fn test_alternating_labels_never_transition() {
        let mut s = Stabilizer::new();
        let mut peak: f64 = 0.0;
        for i in 0..200 {
            let label = if i % 2 == 0 { Emotion::Happy } else { Emotion::Sad };
            assert!(s.ingest(Sample::new(label, 70.0)).is_none());
            peak = peak.max(s.level());
        }
        assert!(peak <= 0.33 + 1e-9, "peak level was {peak}");
        assert_eq!(s.level(), 0.0);
        assert_eq!(s.current_stable(), None);
    }

    #[test]
    fn test_single_outlier_does_not_undo_stable_label() {
        let mut s = Stabilizer::new();
        run(&mut s, &repeat(Emotion::Fear, 20));
        assert!(s.ingest(Sample::new(Emotion::Angry, 99.0)).is_none());
        assert_eq!(s.current_stable(), Some(Emotion::Fear));
        assert_eq!(s.level(), ACCUMULATOR_CAP);
    }

    #[test]
    fn test_new_label_needs_window_majority_and_accumulation() {
        let mut s = Stabilizer::new();
        run(&mut s, &repeat(Emotion::Happy, 20));

        let events = run(&mut s, &repeat(Emotion::Sad, 20));
        assert_eq!(
            events,
            vec![(
                10,
                StableStateChanged {
                    new_label: Emotion::Sad,
                    is_first_ever_stable: false,
                }
            )]
        );
    }
}

// =============================================================================
// Sentinels
// =============================================================================

mod sentinels {
    use super::*;

    #[test]
    fn test_interleaved_no_face_delays_but_keeps_label() {
        let mut s = Stabilizer::new();
        let labels: Vec<Emotion> = (0..60)
            .map(|i| if i % 3 == 2 { Emotion::NoFace } else { Emotion::Angry })
            .collect();

        let events = run(&mut s, &labels);
        assert_eq!(events.len(), 1);
        let (tick, event) = events[0];
        assert!(tick > 14, "sentinels should delay convergence, fired at {tick}");
        assert_eq!(event.new_label, Emotion::Angry);
        assert_eq!(s.majority().unwrap().label, Emotion::Angry);
    }

    #[test]
    fn test_error_samples_do_not_flip_majority() {
        let mut s = Stabilizer::new();
        let labels: Vec<Emotion> = (0..40)
            .map(|i| match i % 4 {
                1 => Emotion::Error,
                3 => Emotion::Disgust,
                _ => Emotion::Neutral,
            })
            .collect();

        for label in labels {
            s.ingest(Sample::new(label, 50.0));
            if let Some(m) = s.majority() {
                assert_eq!(m.label, Emotion::Neutral);
            }
        }
        assert_eq!(s.current_stable(), Some(Emotion::Neutral));
    }

    #[test]
    fn test_lost_face_keeps_prior_stable_label() {
        let mut s = Stabilizer::new();
        run(&mut s, &repeat(Emotion::Happy, 20));

        assert!(run(&mut s, &repeat(Emotion::NoFace, 50)).is_empty());
        assert_eq!(s.current_stable(), Some(Emotion::Happy));
        assert_eq!(s.history().len(), 15);
        assert_eq!(s.level(), ACCUMULATOR_CAP);
    }
}

// =============================================================================
// Session flags and reset
// =============================================================================

mod session {
    use super::*;

    #[test]
    fn test_first_stable_flag_set_exactly_once() {
        let mut s = Stabilizer::new();
        let mut labels = repeat(Emotion::Happy, 40);
        labels.extend(repeat(Emotion::Sad, 40));
        labels.extend(repeat(Emotion::Happy, 40));

        let events = run(&mut s, &labels);
        let labels: Vec<_> = events.iter().map(|(_, e)| e.new_label).collect();
        let firsts: Vec<_> = events.iter().map(|(_, e)| e.is_first_ever_stable).collect();

        assert_eq!(labels, vec![Emotion::Happy, Emotion::Sad, Emotion::Happy]);
        assert_eq!(firsts, vec![true, false, false]);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut once = Stabilizer::new();
        run(&mut once, &repeat(Emotion::Happy, 25));
        once.reset();

        let mut twice = Stabilizer::new();
        run(&mut twice, &repeat(Emotion::Happy, 25));
        twice.reset();
        twice.reset();

        for s in [&once, &twice] {
            assert_eq!(s.phase(), Phase::Warming { samples: 0 });
            assert_eq!(s.level(), 0.0);
            assert_eq!(s.current_stable(), None);
            assert!(!s.has_fired_initial_greeting());
        }
    }

    #[test]
    fn test_warm_up_and_greeting_apply_again_after_reset() {
        let mut s = Stabilizer::new();
        run(&mut s, &repeat(Emotion::Happy, 25));
        s.reset();

        assert!(run(&mut s, &repeat(Emotion::Happy, 4)).is_empty());
        let events = run(&mut s, &repeat(Emotion::Happy, 10));
        assert_eq!(events.len(), 1);
        assert!(events[0].1.is_first_ever_stable);
    }
}
