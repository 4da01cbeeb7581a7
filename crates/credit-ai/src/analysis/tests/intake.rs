use super::common::*;
use crate::analysis::domain::{CreditRequest, PaymentHistory, RequestKind, TaxId};
use crate::analysis::intake::{normalize, normalize_tax_id, ApplicantSubmission, IntakeError};

#[test]
fn strips_tax_id_mask_and_collapses_name() {
    let applicant = normalize(submission()).expect("submission normalizes");

    assert_eq!(applicant.tax_id, TaxId("52998224725".to_string()));
    assert_eq!(applicant.name, "Maria Souza");
    assert_eq!(applicant.score, 750.0);
    assert_eq!(applicant.request.kind, RequestKind::Release);
}

#[test]
fn backfills_missing_payment_history() {
    let mut submission = submission();
    submission.payment_history = None;
    submission.request = None;

    let applicant = normalize(submission).expect("submission normalizes");

    assert_eq!(applicant.payment_history, PaymentHistory::clean());
    assert_eq!(applicant.request, CreditRequest::default());
}

#[test]
fn backfills_individual_missing_counters() {
    let applicant = normalize(submission()).expect("submission normalizes");

    assert_eq!(applicant.payment_history.late_count_60, 0);
    assert_eq!(applicant.payment_history.on_time_ratio, None);
}

#[test]
fn rejects_short_tax_ids() {
    match normalize_tax_id("123.456.789") {
        Err(IntakeError::TaxIdLength { found }) => assert_eq!(found, 9),
        other => panic!("expected tax id length error, got {other:?}"),
    }
}

#[test]
fn rejects_blank_names() {
    let mut submission = submission();
    submission.name = " \u{200b} ".to_string();

    assert_eq!(normalize(submission), Err(IntakeError::MissingName));
}

#[test]
fn rejects_non_finite_numbers() {
    let mut bad_score = submission();
    bad_score.score = f64::NAN;
    assert_eq!(
        normalize(bad_score),
        Err(IntakeError::NonFinite { field: "score" })
    );

    let mut bad_income = submission();
    bad_income.monthly_income = f64::INFINITY;
    assert_eq!(
        normalize(bad_income),
        Err(IntakeError::NonFinite {
            field: "monthlyIncome"
        })
    );
}

#[test]
fn keeps_out_of_range_scores_and_negative_income() {
    let mut submission = submission();
    submission.score = -20.0;
    submission.monthly_income = -150.0;

    let applicant = normalize(submission).expect("engine handles degenerate values");
    assert_eq!(applicant.score, -20.0);
    assert_eq!(applicant.monthly_income, -150.0);
}

#[test]
fn deserializes_camel_case_payloads() {
    let payload = r#"{
        "name": "João Lima",
        "taxId": "111.444.777-35",
        "score": 610,
        "hasRestriction": true,
        "monthlyIncome": 3200.5,
        "paymentHistory": { "lateCount30": 1 },
        "request": { "type": "increase", "requestedAmount": 1500 }
    }"#;

    let submission: ApplicantSubmission = serde_json::from_str(payload).expect("valid json");
    let applicant = normalize(submission).expect("normalizes");

    assert_eq!(applicant.tax_id.as_str(), "11144477735");
    assert!(applicant.has_restriction);
    assert_eq!(applicant.payment_history.late_count_30, 1);
    assert_eq!(applicant.payment_history.late_count_90, 0);
    assert_eq!(applicant.request.kind, RequestKind::Increase);
    assert_eq!(applicant.request.requested_amount, Some(1500.0));
}
