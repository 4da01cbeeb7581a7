use axum::response::Response;
use serde_json::Value;

use crate::analysis::domain::{Applicant, CreditRequest, PaymentHistory, RequestKind, TaxId};
use crate::analysis::engine::{DecisionEngine, DecisionPolicy, PaymentHistoryRule};
use crate::analysis::intake::{
    ApplicantSubmission, CreditRequestSubmission, PaymentHistorySubmission,
};

pub(super) fn applicant(
    score: f64,
    has_restriction: bool,
    monthly_income: f64,
    late: (u32, u32, u32),
) -> Applicant {
    Applicant {
        name: "Maria Souza".to_string(),
        tax_id: TaxId("52998224725".to_string()),
        score,
        has_restriction,
        monthly_income,
        payment_history: PaymentHistory {
            late_count_30: late.0,
            late_count_60: late.1,
            late_count_90: late.2,
            on_time_ratio: None,
        },
        request: CreditRequest {
            kind: RequestKind::Increase,
            requested_amount: Some(2500.0),
        },
    }
}

pub(super) fn clean_applicant(score: f64, monthly_income: f64) -> Applicant {
    applicant(score, false, monthly_income, (0, 0, 0))
}

pub(super) fn engine() -> DecisionEngine {
    DecisionEngine::new(DecisionPolicy::default())
}

pub(super) fn ratio_engine() -> DecisionEngine {
    DecisionEngine::new(DecisionPolicy {
        payment_history_rule: PaymentHistoryRule::OnTimeRatio,
        ..DecisionPolicy::default()
    })
}

pub(super) fn submission() -> ApplicantSubmission {
    ApplicantSubmission {
        name: "  Maria   Souza ".to_string(),
        tax_id: "529.982.247-25".to_string(),
        score: 750.0,
        has_restriction: false,
        monthly_income: 5000.0,
        payment_history: Some(PaymentHistorySubmission {
            late_count_30: Some(0),
            late_count_60: None,
            late_count_90: Some(0),
            on_time_ratio: None,
        }),
        request: Some(CreditRequestSubmission {
            kind: RequestKind::Release,
            requested_amount: None,
        }),
    }
}

pub(super) fn denied_submission() -> ApplicantSubmission {
    ApplicantSubmission {
        score: 300.0,
        has_restriction: true,
        monthly_income: 2000.0,
        payment_history: Some(PaymentHistorySubmission {
            late_count_30: Some(3),
            ..PaymentHistorySubmission::default()
        }),
        ..submission()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
