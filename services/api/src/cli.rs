use crate::render::{run_analyze, run_batch, AnalyzeArgs, BatchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Credit AI",
    about = "Evaluate credit applications from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a single applicant from a JSON file
    Analyze(AnalyzeArgs),
    /// Evaluate every applicant in a CSV export
    Batch(BatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analyze(args),
        Command::Batch(args) => run_batch(args),
    }
}
