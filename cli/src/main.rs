//! CLI for the Redmine migrator.
//!
//! Reads a migration configuration file and copies the configured Redmine
//! project's issues into a GitHub repository.

use clap::Parser;
use redmine_migrator::{RunSummary, Runner, RunnerConfig, RunnerError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Redmine Migrator - Copy Redmine issues, comments and milestones into GitHub.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the migration configuration file.
    #[arg(default_value = "migration.toml")]
    config: PathBuf,

    /// Print the planned issue mapping without creating anything.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    // octocrab talks TLS through rustls, which needs a process-wide provider
    // when more than one backend is compiled in.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let runner = Runner::new(RunnerConfig::new(args.config, args.dry_run))?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Issues fetched: {}", summary.issues_fetched);
    println!("  Issues already migrated: {}", summary.issues_skipped);

    if !summary.dry_run {
        println!("  Issues processed: {}", summary.issues_processed());
        println!("  Issues created: {}", summary.issues_created);
        println!("  Issues closed: {}", summary.issues_closed);
        println!("  Comments created: {}", summary.comments_created);
        println!("  Milestones created: {}", summary.milestones_created);
        println!("  Attachments saved: {}", summary.attachments_saved);
        println!("  Attachments missing: {}", summary.attachments_missing);
    }
}
