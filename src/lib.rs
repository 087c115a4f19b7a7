pub mod analysis;
pub mod config;
pub mod error;
pub mod intake;
pub mod network;

pub use analysis::{
    AnalysisRequest, AnalysisResult, Emotion, EmotionScorer, EmotionScores,
    FacialAnalysisResponse, FacialAnalysisService,
};
pub use config::Configuration;
pub use error::AppError;
pub use intake::{parse_data_url, DataUrl, ImageDecoder};
pub use network::Server;
