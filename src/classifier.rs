use std::time::Duration;

use rand::Rng;

use crate::core::{Emotion, EmotionData};

/// Trigger words and emoji per emotion, matched as substrings of the
/// lowercased input. Each trigger counts at most once.
const KEYWORDS: [(Emotion, &[&str]); 5] = [
    (
        Emotion::Happy,
        &["happy", "joy", "excited", "great", "wonderful", "love", "like", ":)", "😊", "😁"],
    ),
    (
        Emotion::Sad,
        &["sad", "unhappy", "depressed", "down", "miserable", "sorry", ":(", "😢", "😭"],
    ),
    (
        Emotion::Angry,
        &[
            "angry", "mad", "furious", "annoyed", "upset", "hate", "dislike", "frustrated", "😠",
            "😡",
        ],
    ),
    (
        Emotion::Calm,
        &["calm", "peaceful", "relaxed", "content", "satisfied", "okay", "fine", "good", "😌"],
    ),
    (
        Emotion::Neutral,
        &["neutral", "indifferent", "whatever", "ok", "alright", "😐"],
    ),
];

const BASE_CONFIDENCE: f64 = 0.5;
const PER_MATCH_CONFIDENCE: f64 = 0.1;
const MAX_JITTER: f64 = 0.3;
const MAX_CONFIDENCE: f64 = 0.98;

/// Number of distinct triggers of each emotion found in `text`
pub fn keyword_counts(text: &str) -> [(Emotion, usize); 5] {
    let lower = text.to_lowercase();
    KEYWORDS.map(|(emotion, words)| {
        let count = words.iter().filter(|w| lower.contains(*w)).count();
        (emotion, count)
    })
}

/// Fallback when no trigger matched: punctuation and length.
///
/// Length is in Unicode scalar values, so an astral-plane emoji counts as
/// one character rather than two UTF-16 units.
fn heuristic(text: &str) -> Emotion {
    let len = text.chars().count();

    if text.contains('!') {
        if len < 20 {
            Emotion::Happy
        } else {
            Emotion::Angry
        }
    } else if text.contains('?') || len < 10 {
        Emotion::Neutral
    } else if text.split(' ').count() > 15 {
        Emotion::Calm
    } else {
        Emotion::Neutral
    }
}

/// Category plus winning match count. Deterministic.
pub fn categorize(text: &str) -> (Emotion, usize) {
    let mut detected = Emotion::Neutral;
    let mut highest = 0;

    // strictly greater: earlier emotions win ties
    for (emotion, count) in keyword_counts(text) {
        if count > highest {
            highest = count;
            detected = emotion;
        }
    }

    if highest == 0 {
        detected = heuristic(text);
    }

    (detected, highest)
}

/// Bounded pseudo-confidence; not a probability
pub fn confidence<R: Rng + ?Sized>(match_count: usize, rng: &mut R) -> f64 {
    let jitter = rng.gen_range(0.0..MAX_JITTER);
    (BASE_CONFIDENCE + PER_MATCH_CONFIDENCE * match_count as f64 + jitter).min(MAX_CONFIDENCE)
}

pub fn classify_with<R: Rng + ?Sized>(text: &str, rng: &mut R) -> EmotionData {
    let (emotion, matches) = categorize(text);
    let confidence = confidence(matches, rng);

    tracing::debug!(%emotion, matches, confidence, "Classified text");

    EmotionData::new(emotion, confidence)
}

/// Classify `text`. Total: empty input falls through to the heuristic.
pub fn classify(text: &str) -> EmotionData {
    classify_with(text, &mut rand::thread_rng())
}

/// Keyword classifier with simulated inference latency
#[derive(Debug, Clone, Default)]
pub struct EmotionClassifier {
    delay: Duration,
}

impl EmotionClassifier {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn detect(&self, text: &str) -> EmotionData {
        let data = classify(text);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_happy_keywords() {
        let data = classify_with("I love this wonderful day", &mut rng());

        assert_eq!(data.emotion, Emotion::Happy);
        assert!(data.confidence >= 0.7);
        assert!(data.confidence <= MAX_CONFIDENCE);
    }

    #[test]
    fn test_happy_only_input_always_confident() {
        let mut rng = rng();
        for text in ["happy", "so much joy", "😊", "great :)"] {
            let data = classify_with(text, &mut rng);
            assert_eq!(data.emotion, Emotion::Happy, "{}", text);
            assert!(data.confidence >= 0.5);
        }
    }

    #[test]
    fn test_each_emotion_detected() {
        assert_eq!(categorize("I feel so miserable").0, Emotion::Sad);
        assert_eq!(categorize("I'm furious right now").0, Emotion::Angry);
        assert_eq!(categorize("Feeling peaceful and relaxed").0, Emotion::Calm);
        assert_eq!(categorize("whatever").0, Emotion::Neutral);
        assert_eq!(categorize("😭").0, Emotion::Sad);
    }

    #[test]
    fn test_ties_favor_declaration_order() {
        assert_eq!(categorize("happy but sad"), (Emotion::Happy, 1));
        assert_eq!(categorize("sad and angry"), (Emotion::Sad, 1));
        // "ok" matches neutral, "calm" matches calm; calm is declared first
        assert_eq!(categorize("calm and ok"), (Emotion::Calm, 1));
    }

    #[test]
    fn test_highest_count_wins() {
        let counts = keyword_counts("I hate this, so frustrated, but happy");
        assert_eq!(counts[0], (Emotion::Happy, 1));
        assert_eq!(counts[2], (Emotion::Angry, 2));
        assert_eq!(categorize("I hate this, so frustrated, but happy").0, Emotion::Angry);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(categorize("HAPPY").0, Emotion::Happy);
    }

    #[test]
    fn test_empty_input_is_neutral() {
        assert_eq!(categorize(""), (Emotion::Neutral, 0));
        let data = classify_with("", &mut rng());
        assert_eq!(data.emotion, Emotion::Neutral);
        assert!(data.confidence >= 0.5 && data.confidence < 0.8);
    }

    #[test]
    fn test_heuristics() {
        assert_eq!(categorize("Wow!").0, Emotion::Happy);
        assert_eq!(
            categorize("This is completely unacceptable behaviour from everyone!").0,
            Emotion::Angry
        );
        assert_eq!(categorize("What time is it?").0, Emotion::Neutral);
        assert_eq!(categorize("hmm").0, Emotion::Neutral);
        assert_eq!(
            categorize(
                "the train left the station at noon and we walked along the river until the sun went over the hills"
            )
            .0,
            Emotion::Calm
        );
        assert_eq!(categorize("a medium length sentence").0, Emotion::Neutral);
    }

    #[test]
    fn test_exclamation_length_boundary() {
        let nineteen = "abcdefghijklmnopqr!";
        let twenty = "abcdefghijklmnopqrs!";
        assert_eq!(nineteen.chars().count(), 19);
        assert_eq!(twenty.chars().count(), 20);

        assert_eq!(categorize(nineteen), (Emotion::Happy, 0));
        assert_eq!(categorize(twenty), (Emotion::Angry, 0));
    }

    #[test]
    fn test_short_text_boundary() {
        // both sides land on neutral; below 10 it is the length rule,
        // at 10 a single word falls through to the default
        assert_eq!(heuristic("abcdefghi"), Emotion::Neutral);
        assert_eq!(heuristic("abcdefghij"), Emotion::Neutral);
        // nine spaces: ten words, still under the length cut
        assert_eq!(heuristic("         "), Emotion::Neutral);
    }

    #[test]
    fn test_word_count_boundary() {
        let fifteen = vec!["tree"; 15].join(" ");
        let sixteen = vec!["tree"; 16].join(" ");

        assert_eq!(categorize(&fifteen), (Emotion::Neutral, 0));
        assert_eq!(categorize(&sixteen), (Emotion::Calm, 0));
    }

    #[test]
    fn test_emoji_length_counts_scalars() {
        // 11 chars, 21 UTF-16 units: under the 20 cut as chars
        let text = format!("{}!", "🎉".repeat(10));
        assert_eq!(text.chars().count(), 11);
        assert_eq!(categorize(&text).0, Emotion::Happy);
    }

    #[test]
    fn test_confidence_is_capped() {
        let text = "happy joy excited great wonderful love like :) 😊 😁";
        let data = classify_with(text, &mut rng());
        assert_eq!(data.confidence, MAX_CONFIDENCE);
    }

    #[test]
    fn test_confidence_bounds() {
        let mut rng = rng();
        for _ in 0..100 {
            let c = confidence(0, &mut rng);
            assert!((0.5..0.8).contains(&c));
        }
    }

    #[tokio::test]
    async fn test_detect_without_delay() {
        let classifier = EmotionClassifier::default();
        let data = classifier.detect("I am so angry").await;
        assert_eq!(data.emotion, Emotion::Angry);
    }
}
