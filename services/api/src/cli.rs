use crate::listing::{run_jobs_list, run_jobs_stats, JobsListArgs, JobsStatsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_catalog::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Job Catalog",
    about = "Serve the careers job catalog or query a posting export from the command line",
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
    /// Filter, sort, and summarize postings from a JSON or CSV export
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum JobsCommand {
    /// Print the postings that survive the given filters, in display order
    List(JobsListArgs),
    /// Print dashboard totals for an export
    Stats(JobsStatsArgs),
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
        Command::Jobs {
            command: JobsCommand::List(args),
        } => run_jobs_list(args),
        Command::Jobs {
            command: JobsCommand::Stats(args),
        } => run_jobs_stats(args),
    }
}
