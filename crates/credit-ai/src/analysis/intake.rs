use serde::{Deserialize, Serialize};

use super::domain::{Applicant, CreditRequest, PaymentHistory, RequestKind, TaxId};

/// Number of digits in a normalized CPF.
pub const TAX_ID_DIGITS: usize = 11;

/// Validation errors raised while turning a submission into an [`Applicant`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    #[error("applicant name is required")]
    MissingName,
    #[error("tax id must contain 11 digits (found {found})")]
    TaxIdLength { found: usize },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
}

/// Applicant data as submitted by a form or import, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantSubmission {
    #[serde(default)]
    pub name: String,
    pub tax_id: String,
    pub score: f64,
    #[serde(default)]
    pub has_restriction: bool,
    pub monthly_income: f64,
    #[serde(default)]
    pub payment_history: Option<PaymentHistorySubmission>,
    #[serde(default)]
    pub request: Option<CreditRequestSubmission>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHistorySubmission {
    #[serde(default)]
    pub late_count_30: Option<u32>,
    #[serde(default)]
    pub late_count_60: Option<u32>,
    #[serde(default)]
    pub late_count_90: Option<u32>,
    #[serde(default)]
    pub on_time_ratio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditRequestSubmission {
    #[serde(rename = "type")]
    pub kind: RequestKind,
    #[serde(default)]
    pub requested_amount: Option<f64>,
}

/// Convert a submission into the fully-populated record the engine expects.
///
/// Missing payment-history counters become zero; the on-time ratio stays absent so the
/// selected payment-history rule decides how to treat it.
pub fn normalize(submission: ApplicantSubmission) -> Result<Applicant, IntakeError> {
    let name = normalize_name(&submission.name);
    if name.is_empty() {
        return Err(IntakeError::MissingName);
    }

    let tax_id = normalize_tax_id(&submission.tax_id)?;
    let score = finite("score", submission.score)?;
    let monthly_income = finite("monthlyIncome", submission.monthly_income)?;

    let history = submission.payment_history.unwrap_or_default();
    let on_time_ratio = history
        .on_time_ratio
        .map(|ratio| finite("onTimeRatio", ratio))
        .transpose()?;
    let payment_history = PaymentHistory {
        late_count_30: history.late_count_30.unwrap_or(0),
        late_count_60: history.late_count_60.unwrap_or(0),
        late_count_90: history.late_count_90.unwrap_or(0),
        on_time_ratio,
    };

    let request = match submission.request {
        Some(request) => CreditRequest {
            kind: request.kind,
            requested_amount: request
                .requested_amount
                .map(|amount| finite("requestedAmount", amount))
                .transpose()?,
        },
        None => CreditRequest::default(),
    };

    Ok(Applicant {
        name,
        tax_id,
        score,
        has_restriction: submission.has_restriction,
        monthly_income,
        payment_history,
        request,
    })
}

/// Strip mask characters (`123.456.789-09`) and require exactly eleven digits.
pub fn normalize_tax_id(raw: &str) -> Result<TaxId, IntakeError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != TAX_ID_DIGITS {
        return Err(IntakeError::TaxIdLength {
            found: digits.len(),
        });
    }
    Ok(TaxId(digits))
}

fn normalize_name(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn finite(field: &'static str, value: f64) -> Result<f64, IntakeError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(IntakeError::NonFinite { field })
    }
}
