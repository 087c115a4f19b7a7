use serde::{Deserialize, Serialize};

use crate::analysis::emotion::EmotionScores;

pub const DEFAULT_ENGAGEMENT: u8 = 50;
pub const DEFAULT_ATTENTION: u8 = 50;
pub const TIMESTAMP_PLACEHOLDER: &str = "now";

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    /// `data:<mime>;base64,<payload>`
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub emotions: EmotionScores,
    pub engagement: u8,
    pub attention: u8,
    pub timestamp: &'static str,
}

impl AnalysisResult {
    pub fn new(emotions: EmotionScores) -> Self {
        Self {
            emotions,
            engagement: DEFAULT_ENGAGEMENT,
            attention: DEFAULT_ATTENTION,
            timestamp: TIMESTAMP_PLACEHOLDER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacialAnalysisResponse {
    pub facial: AnalysisResult,
}

impl From<AnalysisResult> for FacialAnalysisResponse {
    fn from(facial: AnalysisResult) -> Self {
        Self { facial }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_envelope_shape() {
        let response = FacialAnalysisResponse::from(AnalysisResult::new(
            EmotionScores::from_brightness(255.0),
        ));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "facial": {
                    "emotions": {
                        "happy": 1.0, "sad": 0.0, "angry": 0.1,
                        "surprised": 0.1, "neutral": 0.5, "confused": 0.1
                    },
                    "engagement": 50,
                    "attention": 50,
                    "timestamp": "now"
                }
            })
        );
    }
}
