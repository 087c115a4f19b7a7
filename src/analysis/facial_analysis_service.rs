use std::task::{Context, Poll};

use futures::future::BoxFuture;
use tower::Service;
use tracing::{debug, instrument, Span};
use uuid::Uuid;

use crate::{
    analysis::{
        analysis_result::{AnalysisRequest, AnalysisResult},
        emotion_scorer::EmotionScorer,
    },
    config::Configuration,
    error::AppError,
    intake::{parse_data_url, ImageDecoder},
};

/// Data-URL in, `AnalysisResult` out. Stateless and cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct FacialAnalysisService {
    decoder: ImageDecoder,
    scorer: EmotionScorer,
}

impl FacialAnalysisService {
    pub fn new(decoder: ImageDecoder, scorer: EmotionScorer) -> Self {
        Self { decoder, scorer }
    }

    pub fn from_configuration(configuration: &Configuration) -> Self {
        Self::new(
            ImageDecoder::from_configuration(configuration),
            EmotionScorer::new(),
        )
    }

    /// Decodes and scores synchronously. Decoding is CPU and memory heavy,
    /// so async callers go through the `Service` impl instead.
    #[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
    pub fn analyze(&self, image: &str) -> Result<AnalysisResult, AppError> {
        let data_url = parse_data_url(image)?;
        debug!(
            mime = ?data_url.mime_type(),
            base64 = data_url.is_base64(),
            "Decoding data-URL"
        );
        let bytes = data_url.decode()?;
        let decoded = self.decoder.decode(&bytes)?;
        let emotions = self.scorer.score(&decoded)?;

        Ok(AnalysisResult::new(emotions))
    }
}

impl Service<AnalysisRequest> for FacialAnalysisService {
    type Response = AnalysisResult;
    type Error = AppError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: AnalysisRequest) -> Self::Future {
        let service = self.clone();
        let span = Span::current();

        Box::pin(async move {
            tokio::task::spawn_blocking(move || span.in_scope(|| service.analyze(&request.image)))
                .await?
        })
    }
}
