use super::super::domain::Applicant;
use super::policy::{DecisionPolicy, PaymentHistoryRule};
use serde::Serialize;

/// Stable identifier for each rule so callers can audit which checks fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCode {
    ScoreBelowMinimum,
    BureauRestriction,
    LatePaymentHistory,
    InsufficientOnTimeRatio,
    Custom(&'static str),
}

/// Independent predicate paired with the reason and suggestion it contributes.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub code: RuleCode,
    pub reason: &'static str,
    pub suggestion: &'static str,
    predicate: fn(&Applicant, &DecisionPolicy) -> bool,
}

impl Rule {
    pub const fn new(
        code: RuleCode,
        reason: &'static str,
        suggestion: &'static str,
        predicate: fn(&Applicant, &DecisionPolicy) -> bool,
    ) -> Self {
        Self {
            code,
            reason,
            suggestion,
            predicate,
        }
    }

    pub fn fires(&self, applicant: &Applicant, policy: &DecisionPolicy) -> bool {
        (self.predicate)(applicant, policy)
    }
}

pub(crate) const SCORE_RULE: Rule = Rule::new(
    RuleCode::ScoreBelowMinimum,
    "score below minimum",
    "improve score via on-time payments",
    score_below_minimum,
);

pub(crate) const RESTRICTION_RULE: Rule = Rule::new(
    RuleCode::BureauRestriction,
    "bureau restriction present",
    "clear the restriction",
    restriction_present,
);

pub(crate) const LATE_COUNTS_RULE: Rule = Rule::new(
    RuleCode::LatePaymentHistory,
    "significant late-payment history",
    "keep payments current",
    late_counts_exceeded,
);

pub(crate) const ON_TIME_RATIO_RULE: Rule = Rule::new(
    RuleCode::InsufficientOnTimeRatio,
    "insufficient on-time payment history",
    "raise on-time ratio to ≥70%",
    on_time_ratio_too_low,
);

/// Ordered rule set: score, restriction, then the selected payment-history check.
pub(crate) fn standard_rules(policy: &DecisionPolicy) -> Vec<Rule> {
    let history = match policy.payment_history_rule {
        PaymentHistoryRule::LateCounts => LATE_COUNTS_RULE,
        PaymentHistoryRule::OnTimeRatio => ON_TIME_RATIO_RULE,
    };

    vec![SCORE_RULE, RESTRICTION_RULE, history]
}

fn score_below_minimum(applicant: &Applicant, policy: &DecisionPolicy) -> bool {
    applicant.score < policy.score_minimum
}

fn restriction_present(applicant: &Applicant, _policy: &DecisionPolicy) -> bool {
    applicant.has_restriction
}

fn late_counts_exceeded(applicant: &Applicant, policy: &DecisionPolicy) -> bool {
    let history = &applicant.payment_history;
    history.late_count_30 > policy.max_late_30
        || history.late_count_60 > policy.max_late_60
        || history.late_count_90 > policy.max_late_90
}

fn on_time_ratio_too_low(applicant: &Applicant, policy: &DecisionPolicy) -> bool {
    applicant.payment_history.on_time_ratio.unwrap_or(0.0) < policy.minimum_on_time_ratio
}
