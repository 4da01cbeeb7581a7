use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{Applicant, CreditRequest, Decision, TaxId};
use super::engine::{Assessment, DecisionEngine, DecisionPolicy, RuleCode};
use super::intake::{normalize, ApplicantSubmission, IntakeError};

/// Service composing intake normalization with the decision engine.
#[derive(Debug, Clone)]
pub struct CreditAnalysisService {
    engine: Arc<DecisionEngine>,
}

impl CreditAnalysisService {
    pub fn new(policy: DecisionPolicy) -> Self {
        Self::with_engine(DecisionEngine::new(policy))
    }

    pub fn with_engine(engine: DecisionEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    pub fn policy(&self) -> &DecisionPolicy {
        self.engine.policy()
    }

    /// Normalize a raw submission and evaluate it.
    pub fn analyze(
        &self,
        submission: ApplicantSubmission,
    ) -> Result<AnalysisReport, AnalysisError> {
        let applicant = normalize(submission).inspect_err(|err| {
            warn!(error = %err, "rejected credit submission");
        })?;

        Ok(self.report(applicant))
    }

    /// Evaluate an already-normalized applicant.
    pub fn evaluate(&self, applicant: &Applicant) -> Decision {
        self.engine.evaluate(applicant)
    }

    pub(crate) fn report(&self, applicant: Applicant) -> AnalysisReport {
        let Assessment {
            decision,
            triggered,
        } = self.engine.assess(&applicant);

        match decision.approved_limit {
            Some(limit) => info!(
                tax_id = %applicant.tax_id,
                limit,
                request = applicant.request.kind.label(),
                "credit approved"
            ),
            None => info!(
                tax_id = %applicant.tax_id,
                reasons = decision.denial_reasons.len(),
                request = applicant.request.kind.label(),
                "credit denied"
            ),
        }

        AnalysisReport {
            name: applicant.name,
            tax_id: applicant.tax_id,
            request: applicant.request,
            decision,
            triggered,
            evaluated_at: Utc::now(),
        }
    }
}

impl Default for CreditAnalysisService {
    fn default() -> Self {
        Self::new(DecisionPolicy::default())
    }
}

/// Decision plus the applicant identity and audit metadata returned to callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub name: String,
    pub tax_id: TaxId,
    pub request: CreditRequest,
    pub decision: Decision,
    pub triggered: Vec<RuleCode>,
    pub evaluated_at: DateTime<Utc>,
}

/// Error raised by the analysis service.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
}
