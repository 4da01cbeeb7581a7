use std::io::Cursor;

use crate::analysis::batch::{BatchEntry, BatchImportError, BatchImporter, BatchSummary};
use crate::analysis::domain::TaxId;
use crate::analysis::intake::IntakeError;
use crate::analysis::{BatchRowError, CreditAnalysisService};

const HEADER: &str =
    "name,tax_id,score,has_restriction,monthly_income,late_30,late_60,late_90,on_time_ratio\n";

fn import(rows: &str) -> Vec<BatchEntry> {
    let csv = format!("{HEADER}{rows}");
    BatchImporter::from_reader(Cursor::new(csv), &CreditAnalysisService::default())
        .expect("batch imports")
}

#[test]
fn evaluates_each_row() {
    let entries = import(
        "Maria Souza,529.982.247-25,750,false,5000,0,0,0,\n\
         Pedro Alves,111.444.777-35,300,true,2000,3,,,\n",
    );

    assert_eq!(entries.len(), 2);
    match &entries[0] {
        BatchEntry::Evaluated { row, report } => {
            assert_eq!(*row, 1);
            assert_eq!(report.decision.approved_limit, Some(1875));
        }
        other => panic!("expected evaluation, got {other:?}"),
    }
    match &entries[1] {
        BatchEntry::Evaluated { report, .. } => {
            assert_eq!(report.decision.denial_reasons.len(), 3);
        }
        other => panic!("expected evaluation, got {other:?}"),
    }
}

#[test]
fn rejects_bad_rows_without_aborting() {
    let entries = import(
        "Ana,123,700,false,3000,0,0,0,\n\
         Bia,52998224725,abc,false,3000,0,0,0,\n\
         Caio,52998224725,,false,3000,0,0,0,\n\
         Duda,11144477735,700,talvez,3000,0,0,0,\n\
         Eva,11144477735,700,sim,\"3500,50\",0,0,0,\n",
    );

    let errors: Vec<_> = entries
        .iter()
        .filter_map(|entry| match entry {
            BatchEntry::Rejected { row, error } => Some((*row, error.clone())),
            BatchEntry::Evaluated { .. } => None,
        })
        .collect();

    assert_eq!(
        errors,
        vec![
            (
                1,
                BatchRowError::Intake(IntakeError::TaxIdLength { found: 3 })
            ),
            (
                2,
                BatchRowError::InvalidValue {
                    column: "score",
                    value: "abc".to_string()
                }
            ),
            (3, BatchRowError::MissingValue { column: "score" }),
            (
                4,
                BatchRowError::InvalidValue {
                    column: "has_restriction",
                    value: "talvez".to_string()
                }
            ),
        ]
    );

    match &entries[4] {
        BatchEntry::Evaluated { report, .. } => {
            assert_eq!(report.decision.denial_reasons, vec!["bureau restriction present"]);
        }
        other => panic!("expected evaluation, got {other:?}"),
    }
}

#[test]
fn summary_counts_outcomes_and_duplicates() {
    let entries = import(
        "Maria Souza,529.982.247-25,750,false,5000,0,0,0,\n\
         Maria S.,52998224725,380,false,5000,0,0,0,\n\
         Pedro Alves,111.444.777-35,800,false,2000,0,0,0,\n\
         Broken,1,800,false,2000,0,0,0,\n",
    );

    let summary = BatchSummary::from_entries(&entries);

    assert_eq!(
        summary,
        BatchSummary {
            total: 4,
            approved: 2,
            denied: 1,
            rejected: 1,
            duplicate_tax_ids: vec![TaxId("52998224725".to_string())],
        }
    );
}

#[test]
fn brazilian_amounts_parse_and_ambiguous_commas_are_rejected() {
    let entries = import(
        "Maria Souza,52998224725,750,false,\"5.000,00\",0,0,0,\n\
         Pedro Alves,11144477735,750,false,\"3500,50\",0,0,0,\n\
         Ana Costa,39053344705,750,false,\"5,000\",0,0,0,\n\
         Lucas Pereira,16899535009,750,false,\"12.345,67\",0,0,\"0,95\"\n",
    );

    let limits: Vec<_> = entries
        .iter()
        .map(|entry| match entry {
            BatchEntry::Evaluated { report, .. } => Ok(report.decision.approved_limit),
            BatchEntry::Rejected { error, .. } => Err(error.clone()),
        })
        .collect();

    assert_eq!(
        limits,
        vec![
            Ok(Some(1875)),
            Ok(Some(1313)),
            Err(BatchRowError::InvalidValue {
                column: "monthly_income",
                value: "5,000".to_string()
            }),
            Ok(Some(4630)),
        ]
    );
}

#[test]
fn optional_request_columns_are_honored() {
    let csv = "name,tax_id,score,monthly_income,request_type,requested_amount\n\
               Maria,52998224725,700,4000,aumento,1200\n";

    let entries = BatchImporter::from_reader(Cursor::new(csv), &CreditAnalysisService::default())
        .expect("batch imports");

    match &entries[0] {
        BatchEntry::Evaluated { report, .. } => {
            assert_eq!(report.request.kind.label(), "increase");
            assert_eq!(report.request.requested_amount, Some(1200.0));
            assert!(report.decision.approved);
        }
        other => panic!("expected evaluation, got {other:?}"),
    }
}

#[test]
fn from_path_propagates_io_errors() {
    let error = BatchImporter::from_path(
        "./does-not-exist.csv",
        &CreditAnalysisService::default(),
    )
    .expect_err("expected io error");

    match error {
        BatchImportError::Io(_) => {}
        other => panic!("expected io error, got {other:?}"),
    }
}
