//! Credit analysis: applicant intake, the decision engine, and the thin service and
//! routing layers that callers use to reach it.
//!
//! The engine itself is a pure function from a fully-populated [`Applicant`] to a
//! [`Decision`]. Everything that can fail (tax-id cleanup, numeric checks, CSV parsing)
//! happens before it, in [`intake`] and [`batch`].

pub mod batch;
pub mod domain;
pub mod engine;
pub mod intake;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use batch::{BatchEntry, BatchImportError, BatchImporter, BatchRowError, BatchSummary};
pub use domain::{Applicant, CreditRequest, Decision, PaymentHistory, RequestKind, TaxId};
pub use engine::{
    Assessment, DecisionEngine, DecisionPolicy, PaymentHistoryRule, Rule, RuleCode,
};
pub use intake::{
    normalize, normalize_tax_id, ApplicantSubmission, CreditRequestSubmission, IntakeError,
    PaymentHistorySubmission, TAX_ID_DIGITS,
};
pub use router::analysis_router;
pub use service::{AnalysisError, AnalysisReport, CreditAnalysisService};
