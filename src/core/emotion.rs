use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Detected affect, in declaration order.
///
/// The order matters: the classifier breaks keyword-count ties in favour
/// of the emotion declared first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Calm,
    Neutral,
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Calm,
        Emotion::Neutral,
    ];

    pub fn emoji(&self) -> &'static str {
        match self {
            Emotion::Happy => "😊",
            Emotion::Sad => "😢",
            Emotion::Angry => "😠",
            Emotion::Calm => "😌",
            Emotion::Neutral => "😐",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Calm => "calm",
            Emotion::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::ALL
            .into_iter()
            .find(|e| e.name() == s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown emotion: {}", s))
    }
}

/// One classifier observation. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionData {
    pub emotion: Emotion,

    /// Pseudo-confidence in [0.0, 1.0]
    pub confidence: f64,

    pub timestamp: DateTime<Utc>,
}

impl EmotionData {
    pub fn new(emotion: Emotion, confidence: f64) -> Self {
        Self {
            emotion,
            confidence: confidence.clamp(0.0, 1.0),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emotion_serializes_lowercase() {
        let json = serde_json::to_string(&Emotion::Angry).unwrap();
        assert_eq!(json, "\"angry\"");

        let back: Emotion = serde_json::from_str("\"calm\"").unwrap();
        assert_eq!(back, Emotion::Calm);
    }

    #[test]
    fn test_emotion_from_str() {
        assert_eq!("Happy".parse::<Emotion>().unwrap(), Emotion::Happy);
        assert!("bored".parse::<Emotion>().is_err());
    }

    #[test]
    fn test_confidence_clamping() {
        assert_eq!(EmotionData::new(Emotion::Sad, 1.4).confidence, 1.0);
        assert_eq!(EmotionData::new(Emotion::Sad, -0.1).confidence, 0.0);
    }
}
