pub mod analysis_result;
pub mod emotion;
pub mod emotion_scorer;
pub mod facial_analysis_service;
pub mod luminance;

pub use analysis_result::{AnalysisRequest, AnalysisResult, FacialAnalysisResponse};
pub use emotion::{Emotion, EmotionScores};
pub use emotion_scorer::EmotionScorer;
pub use facial_analysis_service::FacialAnalysisService;
