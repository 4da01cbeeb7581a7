use super::super::domain::Applicant;
use super::policy::DecisionPolicy;

/// `round(income * income_factor * (score / score_normalizer))` in whole currency units.
///
/// Zero or negative income yields a non-positive limit. Non-finite intermediates
/// (e.g. a zero normalizer) collapse to 0.
pub(crate) fn approved_limit(applicant: &Applicant, policy: &DecisionPolicy) -> i64 {
    let base = applicant.monthly_income * policy.income_factor;
    let multiplier = applicant.score / policy.score_normalizer;
    round_half_up(base * multiplier)
}

/// Nearest integer with ties toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
pub(crate) fn round_half_up(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }

    let floor = value.floor();
    let rounded = if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    };

    // `as` saturates at the i64 bounds.
    rounded as i64
}
