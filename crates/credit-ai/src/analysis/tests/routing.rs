use super::common::*;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::analysis::router::{analyze_handler, policy_handler};
use crate::analysis::{analysis_router, CreditAnalysisService};

#[tokio::test]
async fn analyze_handler_returns_approved_report() {
    let service = Arc::new(CreditAnalysisService::default());

    let response = analyze_handler(State(service), axum::Json(submission())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["taxId"], json!("52998224725"));
    assert_eq!(payload["decision"]["approved"], json!(true));
    assert_eq!(payload["decision"]["approvedLimit"], json!(1875));
    assert_eq!(payload["decision"]["denialReasons"], json!([]));
}

#[tokio::test]
async fn analyze_handler_omits_limit_on_denial() {
    let service = Arc::new(CreditAnalysisService::default());

    let response = analyze_handler(State(service), axum::Json(denied_submission())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["decision"]["approved"], json!(false));
    assert!(payload["decision"].get("approvedLimit").is_none());
    assert_eq!(
        payload["triggered"],
        json!(["score_below_minimum", "bureau_restriction", "late_payment_history"])
    );
}

#[tokio::test]
async fn analyze_handler_returns_unprocessable_for_intake_error() {
    let service = Arc::new(CreditAnalysisService::default());
    let mut submission = submission();
    submission.tax_id = "000".to_string();

    let response = analyze_handler(State(service), axum::Json(submission)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("11 digits"));
}

#[tokio::test]
async fn policy_handler_exposes_thresholds() {
    let service = Arc::new(CreditAnalysisService::default());

    let response = policy_handler(State(service)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["scoreMinimum"], json!(400.0));
    assert_eq!(payload["maxLate30"], json!(2));
    assert_eq!(payload["paymentHistoryRule"], json!("late_counts"));
    assert!(payload.get("score_minimum").is_none());
}

#[tokio::test]
async fn analysis_route_accepts_json_payloads() {
    let router = analysis_router(Arc::new(CreditAnalysisService::default()));

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/credit/analysis")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&submission()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["name"], json!("Maria Souza"));
    assert!(payload.get("evaluatedAt").is_some());
}
