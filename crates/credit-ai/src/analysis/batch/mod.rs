mod parser;

pub use parser::BatchRowError;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

use super::domain::TaxId;
use super::intake::normalize;
use super::service::{AnalysisReport, CreditAnalysisService};

#[derive(Debug)]
pub enum BatchImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for BatchImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchImportError::Io(err) => write!(f, "failed to read applicant file: {}", err),
            BatchImportError::Csv(err) => write!(f, "invalid applicant CSV data: {}", err),
        }
    }
}

impl std::error::Error for BatchImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchImportError::Io(err) => Some(err),
            BatchImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for BatchImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Outcome for a single CSV data row (1-based, header excluded).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BatchEntry {
    Evaluated {
        row: usize,
        report: AnalysisReport,
    },
    Rejected {
        row: usize,
        #[serde(serialize_with = "serialize_display")]
        error: BatchRowError,
    },
}

impl BatchEntry {
    pub fn row(&self) -> usize {
        match self {
            BatchEntry::Evaluated { row, .. } | BatchEntry::Rejected { row, .. } => *row,
        }
    }
}

/// Counts and duplicate tax ids across a processed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub approved: usize,
    pub denied: usize,
    pub rejected: usize,
    pub duplicate_tax_ids: Vec<TaxId>,
}

impl BatchSummary {
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        let mut summary = Self {
            total: entries.len(),
            ..Self::default()
        };
        let mut seen: BTreeMap<&TaxId, usize> = BTreeMap::new();

        for entry in entries {
            match entry {
                BatchEntry::Evaluated { report, .. } => {
                    if report.decision.approved {
                        summary.approved += 1;
                    } else {
                        summary.denied += 1;
                    }
                    *seen.entry(&report.tax_id).or_default() += 1;
                }
                BatchEntry::Rejected { .. } => summary.rejected += 1,
            }
        }

        summary.duplicate_tax_ids = seen
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(tax_id, _)| tax_id.clone())
            .collect();

        summary
    }
}

/// Runs every applicant in a CSV export through intake and the decision engine.
pub struct BatchImporter;

impl BatchImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        service: &CreditAnalysisService,
    ) -> Result<Vec<BatchEntry>, BatchImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, service)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        service: &CreditAnalysisService,
    ) -> Result<Vec<BatchEntry>, BatchImportError> {
        let rows = parser::parse_rows(reader)?;
        let mut entries = Vec::with_capacity(rows.len());

        for (index, parsed) in rows.into_iter().enumerate() {
            let row = index + 1;
            let applicant = parsed.and_then(|submission| normalize(submission).map_err(Into::into));

            match applicant {
                Ok(applicant) => entries.push(BatchEntry::Evaluated {
                    row,
                    report: service.report(applicant),
                }),
                Err(error) => {
                    warn!(row, error = %error, "skipping applicant row");
                    entries.push(BatchEntry::Rejected { row, error });
                }
            }
        }

        let summary = BatchSummary::from_entries(&entries);
        for tax_id in &summary.duplicate_tax_ids {
            warn!(tax_id = %tax_id, "tax id appears more than once in batch");
        }

        Ok(entries)
    }
}

fn serialize_display<S>(value: &BatchRowError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(value)
}
