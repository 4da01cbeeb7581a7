mod limit;
mod policy;
mod rules;

pub use policy::{
    DecisionPolicy, PaymentHistoryRule, DEFAULT_INCOME_FACTOR, DEFAULT_MINIMUM_ON_TIME_RATIO,
    DEFAULT_SCORE_MINIMUM, DEFAULT_SCORE_NORMALIZER,
};
pub use rules::{Rule, RuleCode};

use super::domain::{Applicant, Decision};

/// Stateless evaluator applying an ordered rule set and the limit formula.
///
/// Every rule is checked; reasons and suggestions come out in rule order. The engine
/// never fails and never mutates its input.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    policy: DecisionPolicy,
    rules: Vec<Rule>,
}

impl DecisionEngine {
    pub fn new(policy: DecisionPolicy) -> Self {
        let rules = rules::standard_rules(&policy);
        Self { policy, rules }
    }

    /// Append a rule after the standard set. Existing ordering is preserved.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Codes of the rules that fire for `applicant`, in evaluation order.
    pub fn triggered(&self, applicant: &Applicant) -> Vec<RuleCode> {
        self.rules
            .iter()
            .filter(|rule| rule.fires(applicant, &self.policy))
            .map(|rule| rule.code)
            .collect()
    }

    pub fn evaluate(&self, applicant: &Applicant) -> Decision {
        self.assess(applicant).decision
    }

    /// Decision together with the codes of the rules that produced it, from a
    /// single pass over the rule set.
    pub fn assess(&self, applicant: &Applicant) -> Assessment {
        let mut triggered = Vec::new();
        let mut reasons = Vec::new();
        let mut suggestions = Vec::new();

        for rule in &self.rules {
            if rule.fires(applicant, &self.policy) {
                triggered.push(rule.code);
                reasons.push(rule.reason.to_string());
                suggestions.push(rule.suggestion.to_string());
            }
        }

        let decision = if reasons.is_empty() {
            Decision::approve(limit::approved_limit(applicant, &self.policy))
        } else {
            Decision::deny(reasons, suggestions)
        };

        Assessment {
            decision,
            triggered,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub decision: Decision,
    pub triggered: Vec<RuleCode>,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(DecisionPolicy::default())
    }
}
