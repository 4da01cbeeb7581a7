use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::super::domain::RequestKind;
use super::super::intake::{
    ApplicantSubmission, CreditRequestSubmission, PaymentHistorySubmission,
};

/// Row-level problems that reject a single applicant without aborting the batch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BatchRowError {
    #[error("missing required column value '{column}'")]
    MissingValue { column: &'static str },
    #[error("invalid value '{value}' for column '{column}'")]
    InvalidValue { column: &'static str, value: String },
    #[error(transparent)]
    Intake(#[from] crate::analysis::intake::IntakeError),
}

pub(crate) fn parse_rows<R: Read>(
    reader: R,
) -> Result<Vec<Result<ApplicantSubmission, BatchRowError>>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<ApplicantRow>() {
        let row = record?;
        rows.push(row.into_submission());
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct ApplicantRow {
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    tax_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    score: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    has_restriction: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    monthly_income: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    late_30: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    late_60: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    late_90: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    on_time_ratio: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    request_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    requested_amount: Option<String>,
}

impl ApplicantRow {
    fn into_submission(self) -> Result<ApplicantSubmission, BatchRowError> {
        let tax_id = required("tax_id", self.tax_id)?;
        let score = parse_number("score", &required("score", self.score)?)?;
        let monthly_income =
            parse_number("monthly_income", &required("monthly_income", self.monthly_income)?)?;
        let has_restriction = self
            .has_restriction
            .map(|value| parse_flag("has_restriction", &value))
            .transpose()?
            .unwrap_or(false);

        let payment_history = PaymentHistorySubmission {
            late_count_30: parse_optional_count("late_30", self.late_30)?,
            late_count_60: parse_optional_count("late_60", self.late_60)?,
            late_count_90: parse_optional_count("late_90", self.late_90)?,
            on_time_ratio: self
                .on_time_ratio
                .map(|value| parse_number("on_time_ratio", &value))
                .transpose()?,
        };

        let request = match self.request_type {
            Some(value) => Some(CreditRequestSubmission {
                kind: parse_request_kind(&value)?,
                requested_amount: self
                    .requested_amount
                    .map(|amount| parse_number("requested_amount", &amount))
                    .transpose()?,
            }),
            None => None,
        };

        Ok(ApplicantSubmission {
            name: self.name,
            tax_id,
            score,
            has_restriction,
            monthly_income,
            payment_history: Some(payment_history),
            request,
        })
    }
}

fn required(column: &'static str, value: Option<String>) -> Result<String, BatchRowError> {
    value.ok_or(BatchRowError::MissingValue { column })
}

/// Plain numbers parse as-is. A comma marks the pt-BR decimal separator
/// (`3500,50`, `5.000,00`), with dots before it read as thousands groups.
/// A lone comma followed by exactly three digits (`5,000`) could be an en-US
/// thousands group and is rejected.
fn parse_number(column: &'static str, value: &str) -> Result<f64, BatchRowError> {
    let normalized = match value.split_once(',') {
        None => value.to_string(),
        Some((whole, fraction)) => {
            let ambiguous = !whole.contains('.')
                && fraction.len() == 3
                && fraction.chars().all(|ch| ch.is_ascii_digit());
            if ambiguous || fraction.contains([',', '.']) {
                return Err(invalid(column, value));
            }
            format!("{}.{fraction}", whole.replace('.', ""))
        }
    };

    normalized
        .parse::<f64>()
        .map_err(|_| invalid(column, value))
}

fn parse_optional_count(
    column: &'static str,
    value: Option<String>,
) -> Result<Option<u32>, BatchRowError> {
    value
        .map(|raw| raw.parse::<u32>().map_err(|_| invalid(column, &raw)))
        .transpose()
}

fn parse_flag(column: &'static str, value: &str) -> Result<bool, BatchRowError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "sim" | "s" => Ok(true),
        "false" | "0" | "no" | "n" | "nao" | "não" => Ok(false),
        _ => Err(invalid(column, value)),
    }
}

fn parse_request_kind(value: &str) -> Result<RequestKind, BatchRowError> {
    match value.to_lowercase().as_str() {
        "release" | "liberacao" | "liberação" => Ok(RequestKind::Release),
        "increase" | "aumento" => Ok(RequestKind::Increase),
        _ => Err(invalid("request_type", value)),
    }
}

fn invalid(column: &'static str, value: &str) -> BatchRowError {
    BatchRowError::InvalidValue {
        column,
        value: value.to_string(),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
