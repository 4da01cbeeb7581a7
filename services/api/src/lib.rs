mod cli;
mod infra;
mod render;
mod routes;
mod server;

use credit_ai::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
