//! # perf-review
//!
//! Command-line interface that summarizes a year of review and writing work.
//!
//! # Commands
//!
//! - `github` - Count the pull request reviews made in an organization
//! - `confluence` - Summarize the Confluence pages created in the period
//! - `all` - Run both and print a single report
//!
//! # Examples
//!
//! ```bash
//! export GITHUB_ACCESS_TOKEN=ghp_...
//! perf-review github --from 2024-01-01T00:00:00Z --to 2024-12-31T23:59:59Z
//!
//! # JSON output for further processing
//! perf-review --format json all
//! ```

#![deny(missing_docs)]

use clap::{Parser, Subcommand};
use std::process::{ExitCode, Termination};
use tracing::{error, level_filters::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Command implementations for the CLI.
mod commands;

/// Configuration management for the CLI.
mod config;

/// Error types specific to the CLI.
mod errors;

/// Text and JSON rendering of a report.
mod output;

use commands::report::{Pipelines, ReportArgs};
use output::OutputFormat;

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// Environment variable holding the log filter, e.g. `perf_review_core=debug`
const LOG_ENV_VAR: &str = "PERF_REVIEW_LOG";

/// Command-line interface structure for perf-review.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format of the report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// The subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available commands for perf-review.
#[derive(Subcommand)]
enum Commands {
    /// Summarize pull request review contributions on GitHub
    Github(ReportArgs),

    /// Summarize the Confluence pages you created
    Confluence(ReportArgs),

    /// Run every pipeline and print one report
    All(ReportArgs),
}

impl Commands {
    /// Splits the command into the pipelines to run and their arguments.
    fn into_parts(self) -> (Pipelines, ReportArgs) {
        match self {
            Commands::Github(args) => (Pipelines::Contributions, args),
            Commands::Confluence(args) => (Pipelines::Documents, args),
            Commands::All(args) => (Pipelines::All, args),
        }
    }
}

/// Sets up the tracing subscriber. Logs go to stderr so the report on stdout
/// stays clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .with_env_var(LOG_ENV_VAR)
                .from_env_lossy(),
        )
        .init();
}

/// Main entry point for the perf-review CLI.
///
/// Exits with a code that identifies the kind of failure, see
/// [`errors::CliError`].
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (pipelines, args) = cli.command.into_parts();
    match commands::report::execute(args, pipelines, cli.format).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error generating the report: {}", e);
            eprintln!("{}", e);
            e.report()
        }
    }
}
