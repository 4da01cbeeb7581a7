use serde::{Deserialize, Serialize};

/// Digits-only taxpayer identifier (CPF) as it reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxId(pub String);

impl TaxId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully-populated applicant snapshot evaluated by the decision engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    pub name: String,
    pub tax_id: TaxId,
    pub score: f64,
    pub has_restriction: bool,
    pub monthly_income: f64,
    pub payment_history: PaymentHistory,
    pub request: CreditRequest,
}

/// Late-payment counters per delinquency bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHistory {
    pub late_count_30: u32,
    pub late_count_60: u32,
    pub late_count_90: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_time_ratio: Option<f64>,
}

impl PaymentHistory {
    pub const fn clean() -> Self {
        Self {
            late_count_30: 0,
            late_count_60: 0,
            late_count_90: 0,
            on_time_ratio: None,
        }
    }

    pub fn total_late(&self) -> u64 {
        u64::from(self.late_count_30)
            + u64::from(self.late_count_60)
            + u64::from(self.late_count_90)
    }
}

/// What the applicant asked for. Carried through, never consulted by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditRequest {
    #[serde(rename = "type")]
    pub kind: RequestKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_amount: Option<f64>,
}

impl Default for CreditRequest {
    fn default() -> Self {
        Self {
            kind: RequestKind::Release,
            requested_amount: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// First-time credit line.
    Release,
    /// Raise on an existing line.
    Increase,
}

impl RequestKind {
    pub const fn label(self) -> &'static str {
        match self {
            RequestKind::Release => "release",
            RequestKind::Increase => "increase",
        }
    }
}

/// Engine output. `approved_limit` is present iff `approved`, and the reason and
/// suggestion lists are empty iff `approved`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub approved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_limit: Option<i64>,
    pub denial_reasons: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Decision {
    pub(crate) fn approve(limit: i64) -> Self {
        Self {
            approved: true,
            approved_limit: Some(limit),
            denial_reasons: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub(crate) fn deny(denial_reasons: Vec<String>, suggestions: Vec<String>) -> Self {
        Self {
            approved: false,
            approved_limit: None,
            denial_reasons,
            suggestions,
        }
    }

    pub fn summary(&self) -> String {
        match (self.approved, self.approved_limit) {
            (true, Some(limit)) => format!("approved with limit {limit}"),
            (true, None) => "approved".to_string(),
            (false, _) => format!("denied: {}", self.denial_reasons.join("; ")),
        }
    }
}
