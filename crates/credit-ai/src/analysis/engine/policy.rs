use serde::{Deserialize, Serialize};

pub const DEFAULT_SCORE_MINIMUM: f64 = 400.0;
pub const DEFAULT_INCOME_FACTOR: f64 = 0.5;
pub const DEFAULT_SCORE_NORMALIZER: f64 = 1000.0;
pub const DEFAULT_MINIMUM_ON_TIME_RATIO: f64 = 0.7;

/// Thresholds and rule selection injected into the decision engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionPolicy {
    pub score_minimum: f64,
    pub income_factor: f64,
    pub score_normalizer: f64,
    pub max_late_30: u32,
    pub max_late_60: u32,
    pub max_late_90: u32,
    pub minimum_on_time_ratio: f64,
    pub payment_history_rule: PaymentHistoryRule,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            score_minimum: DEFAULT_SCORE_MINIMUM,
            income_factor: DEFAULT_INCOME_FACTOR,
            score_normalizer: DEFAULT_SCORE_NORMALIZER,
            max_late_30: 2,
            max_late_60: 0,
            max_late_90: 0,
            minimum_on_time_ratio: DEFAULT_MINIMUM_ON_TIME_RATIO,
            payment_history_rule: PaymentHistoryRule::LateCounts,
        }
    }
}

/// Which payment-history check the engine installs. Exactly one is active per engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentHistoryRule {
    /// Deny on 30-day delinquencies above the allowance or any 60/90-day delinquency.
    #[default]
    LateCounts,
    /// Deny when the on-time ratio (missing counts as zero) is under the minimum.
    OnTimeRatio,
}

impl PaymentHistoryRule {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "late_counts" | "counts" | "count" => Some(Self::LateCounts),
            "on_time_ratio" | "ratio" => Some(Self::OnTimeRatio),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PaymentHistoryRule::LateCounts => "late_counts",
            PaymentHistoryRule::OnTimeRatio => "on_time_ratio",
        }
    }
}
