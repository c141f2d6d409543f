//! Writing issues to the destination tracker.
//!
//! [`DestinationTracker`] is the surface the migrator writes through;
//! [`GitHubTracker`] implements it with octocrab.

mod error;
mod github;
mod models;

pub use error::DestinationError;
pub use github::GitHubTracker;
pub use models::{ExistingIssue, Milestone, NewIssue};

use async_trait::async_trait;

/// Read/write access to the tracker issues are migrated to.
#[async_trait]
pub trait DestinationTracker: Send + Sync {
    /// Lists all issues and pull requests in every state.
    async fn list_issues(&self) -> Result<Vec<ExistingIssue>, DestinationError>;

    /// Lists all milestones in every state.
    async fn list_milestones(&self) -> Result<Vec<Milestone>, DestinationError>;

    /// Creates a milestone with the given title.
    async fn create_milestone(&self, title: &str) -> Result<Milestone, DestinationError>;

    /// Creates an issue, returning it with its assigned number.
    async fn create_issue(&self, issue: &NewIssue) -> Result<ExistingIssue, DestinationError>;

    /// Adds a comment to an issue.
    async fn create_comment(&self, number: u64, body: &str) -> Result<(), DestinationError>;

    /// Closes an issue.
    async fn close_issue(&self, number: u64) -> Result<(), DestinationError>;
}
