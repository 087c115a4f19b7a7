use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tower::ServiceExt;

use crate::{
    analysis::{AnalysisRequest, FacialAnalysisResponse, FacialAnalysisService},
    error::AppError,
};

pub const FACIAL_ANALYSIS_PATH: &str = "/api/facial-analysis";

pub async fn facial_analysis_handler(
    State(service): State<FacialAnalysisService>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<FacialAnalysisResponse>, AppError> {
    let Json(request) = payload.map_err(reject_payload)?;
    let result = service.oneshot(request).await?;
    Ok(Json(result.into()))
}

fn reject_payload(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(rejection.body_text())
    } else {
        AppError::MalformedRequest(rejection.body_text())
    }
}
