use crate::infra::load_submission;
use clap::Args;
use credit_ai::analysis::{
    AnalysisReport, BatchEntry, BatchImporter, BatchSummary, CreditAnalysisService,
};
use credit_ai::config::AppConfig;
use credit_ai::error::AppError;
use credit_ai::telemetry;
use serde_json::json;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// JSON file holding a single applicant submission
    #[arg(long)]
    pub(crate) file: PathBuf,
    /// Print the analysis report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with one applicant per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print entries and summary as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let service = cli_service()?;

    let submission = load_submission(&args.file)?;
    let report = service.analyze(submission)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let service = cli_service()?;

    let entries = BatchImporter::from_path(&args.csv, &service)?;
    let summary = BatchSummary::from_entries(&entries);

    if args.json {
        let payload = json!({ "entries": entries, "summary": summary });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print!("{}", render_batch(&entries, &summary));
    }

    Ok(())
}

/// Config, policy and logging for one-shot commands, set up like `serve`.
fn cli_service() -> Result<CreditAnalysisService, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(CreditAnalysisService::new(config.policy))
}

pub(crate) fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let decision = &report.decision;

    out.push_str(&format!("Applicant: {} ({})\n", report.name, report.tax_id));
    out.push_str(&format!("Request: {}\n", report.request.kind.label()));

    if decision.approved {
        out.push_str("Result: APPROVED\n");
        if let Some(limit) = decision.approved_limit {
            out.push_str(&format!("Approved limit: {}\n", format_brl(limit)));
        }
        return out;
    }

    out.push_str("Result: DENIED\n");
    out.push_str("\nReasons\n");
    for reason in &decision.denial_reasons {
        out.push_str(&format!("- {reason}\n"));
    }
    out.push_str("\nSuggestions\n");
    for suggestion in &decision.suggestions {
        out.push_str(&format!("- {suggestion}\n"));
    }

    out
}

pub(crate) fn render_batch(entries: &[BatchEntry], summary: &BatchSummary) -> String {
    let mut out = String::new();

    out.push_str("Batch analysis\n");
    for entry in entries {
        match entry {
            BatchEntry::Evaluated { row, report } => {
                let outcome = match report.decision.approved_limit {
                    Some(limit) => format!("approved, limit {}", format_brl(limit)),
                    None => format!("denied ({})", report.decision.denial_reasons.join("; ")),
                };
                out.push_str(&format!(
                    "- row {row}: {} ({}) {outcome}\n",
                    report.name, report.tax_id
                ));
            }
            BatchEntry::Rejected { row, error } => {
                out.push_str(&format!("- row {row}: rejected, {error}\n"));
            }
        }
    }

    out.push_str(&format!(
        "\n{} rows: {} approved, {} denied, {} rejected\n",
        summary.total, summary.approved, summary.denied, summary.rejected
    ));

    if !summary.duplicate_tax_ids.is_empty() {
        let duplicates: Vec<&str> = summary
            .duplicate_tax_ids
            .iter()
            .map(|tax_id| tax_id.as_str())
            .collect();
        out.push_str(&format!("Duplicate tax ids: {}\n", duplicates.join(", ")));
    }

    out
}

/// Brazilian real formatting for whole-unit limits: `1875 -> "R$ 1.875,00"`.
pub(crate) fn format_brl(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},00")
}
