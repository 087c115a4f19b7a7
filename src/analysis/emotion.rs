use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Surprised,
    Neutral,
    Confused,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Surprised,
        Emotion::Neutral,
        Emotion::Confused,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Surprised => "surprised",
            Emotion::Neutral => "neutral",
            Emotion::Confused => "confused",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scores for the six emotion labels, each in `[0.0, 1.0]` and rounded to
/// two decimals. Serializes as an object keyed by label, in `Emotion::ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmotionScores {
    happy: f64,
    sad: f64,
    angry: f64,
    surprised: f64,
    neutral: f64,
    confused: f64,
}

impl EmotionScores {
    pub const BASELINE_ANGRY: f64 = 0.1;
    pub const BASELINE_SURPRISED: f64 = 0.1;
    pub const BASELINE_NEUTRAL: f64 = 0.5;
    pub const BASELINE_CONFUSED: f64 = 0.1;

    /// Maps an average luminance (0..=255) onto the score set.
    pub fn from_brightness(average: f64) -> Self {
        let ratio = average / 255.0;
        Self {
            happy: round_to_hundredths(clamp_unit(ratio)),
            sad: round_to_hundredths(clamp_unit(1.0 - ratio)),
            angry: Self::BASELINE_ANGRY,
            surprised: Self::BASELINE_SURPRISED,
            neutral: Self::BASELINE_NEUTRAL,
            confused: Self::BASELINE_CONFUSED,
        }
    }

    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Happy => self.happy,
            Emotion::Sad => self.sad,
            Emotion::Angry => self.angry,
            Emotion::Surprised => self.surprised,
            Emotion::Neutral => self.neutral,
            Emotion::Confused => self.confused,
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Rounds half-to-even on the exact binary value, so `0.125` becomes `0.12`
/// and `0.875` becomes `0.88`.
pub fn round_to_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
