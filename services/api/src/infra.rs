use credit_ai::analysis::ApplicantSubmission;
use credit_ai::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn load_submission(path: &Path) -> Result<ApplicantSubmission, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let submission = serde_json::from_str(&raw)?;
    Ok(submission)
}
