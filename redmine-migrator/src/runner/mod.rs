//! Orchestrates a Redmine to GitHub migration run.

mod config;
mod error;
mod migrator;

pub use config::RunnerConfig;
pub use error::RunnerError;
pub use migrator::Migrator;

use crate::config::MigrationConfig;
use crate::destination::GitHubTracker;
use crate::session::{PlannedAction, PlannedIssue};
use crate::source::RedmineClient;
use crate::summary::RunSummary;
use tracing::info;

/// Runs a migration between the configured Redmine project and GitHub repository.
pub struct Runner {
    config: RunnerConfig,
    migrator: Migrator<RedmineClient, GitHubTracker>,
}

impl Runner {
    /// Loads the migration configuration and builds both tracker clients.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a client cannot be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let settings = MigrationConfig::load(config.config_path())?;
        let source = RedmineClient::new(&settings.redmine)?;
        let destination = GitHubTracker::new(&settings.github)?;

        Ok(Self {
            config,
            migrator: Migrator::new(source, destination, settings)?,
        })
    }

    /// Executes the migration, or only previews it in dry-run mode.
    ///
    /// # Errors
    ///
    /// Returns the first error that aborted the run.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        if !self.config.dry_run() {
            return self.migrator.run().await;
        }

        info!("Dry run, no issues will be created");
        let plan = self.migrator.preview().await?;
        print_dry_run_preview(&plan);

        let mut summary = RunSummary::new(true);
        summary.issues_fetched = plan.len();
        summary.issues_skipped = plan
            .iter()
            .filter(|issue| issue.action == PlannedAction::Skip)
            .count();
        Ok(summary)
    }
}

fn print_dry_run_preview(plan: &[PlannedIssue]) {
    println!("\n[DRY RUN] {} source issues:\n", plan.len());

    for (i, issue) in plan.iter().enumerate() {
        let action = match issue.action {
            PlannedAction::Create => "would create",
            PlannedAction::Skip => "exists as",
        };
        println!(
            "  [{}/{}] #{} {} -> {} #{}",
            i + 1,
            plan.len(),
            issue.source_id,
            issue.title,
            action,
            issue.number
        );
    }

    println!();
}
