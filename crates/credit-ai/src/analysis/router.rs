use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::intake::ApplicantSubmission;
use super::service::{AnalysisError, CreditAnalysisService};

/// Router builder exposing the analysis endpoints.
pub fn analysis_router(service: Arc<CreditAnalysisService>) -> Router {
    Router::new()
        .route("/api/v1/credit/analysis", post(analyze_handler))
        .route("/api/v1/credit/policy", get(policy_handler))
        .with_state(service)
}

pub(crate) async fn analyze_handler(
    State(service): State<Arc<CreditAnalysisService>>,
    axum::Json(submission): axum::Json<ApplicantSubmission>,
) -> Response {
    match service.analyze(submission) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(AnalysisError::Intake(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn policy_handler(
    State(service): State<Arc<CreditAnalysisService>>,
) -> Response {
    (StatusCode::OK, axum::Json(service.policy().clone())).into_response()
}
