//! Reading issues from the source tracker.
//!
//! [`SourceTracker`] is the read-only surface the migrator needs;
//! [`RedmineClient`] implements it over the Redmine REST API.

mod error;
mod models;
mod redmine;

pub use error::SourceError;
pub use models::{
    Attachment, JournalDetail, JournalEntry, SourceIssue, SourceProject, ATTACHMENT_PROPERTY,
};
pub use redmine::RedmineClient;

use async_trait::async_trait;

/// Read-only access to the tracker issues are migrated from.
#[async_trait]
pub trait SourceTracker: Send + Sync {
    /// Resolves the configured project.
    async fn project(&self) -> Result<SourceProject, SourceError>;

    /// Lists every issue of the project regardless of status, sorted by
    /// ascending id, with journals populated.
    async fn list_issues(&self, project: &SourceProject) -> Result<Vec<SourceIssue>, SourceError>;

    /// Fetches attachment metadata.
    ///
    /// Returns [`SourceError::NotFound`] for attachments that were deleted.
    async fn attachment(&self, id: &str) -> Result<Attachment, SourceError>;

    /// Downloads the raw bytes behind an attachment URL.
    async fn download(&self, url: &str) -> Result<Vec<u8>, SourceError>;
}
