mod cli;
mod infra;
mod listing;
mod routes;
mod server;

use job_catalog::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
