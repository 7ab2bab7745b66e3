//! Prompts and canned replies used when the chat backend is unreachable.

use emo_emotion::Emotion;
use rand::seq::SliceRandom;
use rand::Rng;

/// Prompt sent once, when the first stable emotion is detected.
pub fn greeting_prompt(emotion: Emotion) -> String {
    format!(
        "The user appears to be feeling {}. Introduce yourself as an emotion-aware AI assistant and ask how you can help. Keep it brief.",
        emotion.display_name()
    )
}

fn replies_for(emotion: Emotion) -> &'static [&'static str; 3] {
    match emotion {
        Emotion::Happy => &[
            "It's wonderful to see you so happy! What's bringing you joy today? 😊",
            "Your positive energy is contagious! Tell me more about what's making you smile. 🌟",
            "I love seeing you this happy! Would you like to share what's going well? 🎉",
        ],
        Emotion::Sad => &[
            "I'm here for you. Would you like to talk about what's making you feel down? 💙",
            "It's okay to feel sad sometimes. I'm listening if you want to share what's on your mind. 🌧️",
            "I sense you're having a tough time. Remember that I'm here to support you. 🫂",
        ],
        Emotion::Angry => &[
            "I can see you're upset. Would it help to talk about what's frustrating you? 🔥",
            "Anger is a valid emotion. Want to discuss what's triggering these feelings? ⚡",
            "I notice you're angry. Sometimes expressing it can help - want to talk about it? 💢",
        ],
        Emotion::Surprise => &[
            "You seem surprised! Did something unexpected happen? 😲",
            "I detect surprise! Care to share what caught you off guard? 🤩",
            "You look surprised! Is there something new or unexpected happening? 🎭",
        ],
        Emotion::Fear => &[
            "It seems like you're feeling anxious. Would it help to talk about what's worrying you? 😰",
            "I sense some fear or anxiety. Remember, you're safe here. Want to discuss what's troubling you? 🌫️",
            "I notice you're feeling fearful. Sometimes sharing our concerns can make them feel more manageable. 🫂",
        ],
        Emotion::Disgust => &[
            "You seem displeased with something. Want to talk about what's bothering you? 🤢",
            "I sense some disapproval. Care to share what's causing this reaction? 😖",
            "You appear to be feeling disgusted. Is there something specific that's triggering this feeling? 🙅",
        ],
        Emotion::Neutral | Emotion::NoFace | Emotion::Error => &[
            "You seem calm and neutral. How's your day going? 🍃",
            "I detect a neutral mood. What's on your mind today? 💭",
            "You appear balanced and calm. Is there anything you'd like to talk about? 🌊",
        ],
    }
}

/// Pick a canned reply for `emotion`, avoiding `last` when possible.
///
/// `None` and the sentinels use the neutral replies.
pub fn fallback_response<R>(emotion: Option<Emotion>, last: Option<&str>, rng: &mut R) -> &'static str
where
    R: Rng + ?Sized,
{
    let replies = replies_for(emotion.unwrap_or(Emotion::Neutral));
    let fresh: Vec<&'static str> = replies
        .iter()
        .copied()
        .filter(|reply| Some(*reply) != last)
        .collect();

    let pool: &[&'static str] = if fresh.is_empty() { replies } else { &fresh };
    pool.choose(rng).copied().unwrap_or(replies[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_greeting_prompt() {
        assert_eq!(
            greeting_prompt(Emotion::Happy),
            "The user appears to be feeling Happy. Introduce yourself as an emotion-aware AI assistant and ask how you can help. Keep it brief."
        );
    }

    #[test]
    fn test_fallback_never_repeats_last() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut last: Option<&str> = None;
        for _ in 0..50 {
            let reply = fallback_response(Some(Emotion::Sad), last, &mut rng);
            assert_ne!(Some(reply), last);
            assert!(replies_for(Emotion::Sad).contains(&reply));
            last = Some(reply);
        }
    }

    #[test]
    fn test_fallback_defaults_to_neutral() {
        let mut rng = StdRng::seed_from_u64(1);
        for emotion in [None, Some(Emotion::NoFace), Some(Emotion::Error)] {
            let reply = fallback_response(emotion, None, &mut rng);
            assert!(replies_for(Emotion::Neutral).contains(&reply));
        }
    }

    #[test]
    fn test_every_class_has_distinct_replies() {
        for emotion in Emotion::CLASSES {
            let replies = replies_for(emotion);
            assert_ne!(replies[0], replies[1]);
            assert_ne!(replies[1], replies[2]);
            assert_ne!(replies[0], replies[2]);
        }
    }
}
