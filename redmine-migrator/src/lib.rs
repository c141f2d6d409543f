#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod attachments;
pub mod config;
pub mod destination;
pub mod issues;
pub mod rate_limit;
pub mod runner;
pub mod session;
pub mod source;
pub mod summary;
pub mod templates;
pub mod transform;

pub use attachments::{
    collect_attachments, repository_relative, AttachmentError, AttachmentLink, AttachmentStore,
    CollectedAttachments,
};
pub use config::{ConfigError, GitHubSettings, MigrationConfig, MigrationSettings, RedmineSettings};
pub use destination::{
    DestinationError, DestinationTracker, ExistingIssue, GitHubTracker, Milestone, NewIssue,
};
pub use issues::{compose_comment, compose_issue, is_closed_status, issue_labels, CLOSED_STATUSES};
pub use rate_limit::{
    check_core_rate_limit, ensure_core_rate_limit, pause_after_creation, wait_if_needed,
    RateLimitInfo,
};
pub use runner::{Migrator, Runner, RunnerConfig, RunnerError};
pub use session::{IdMap, MigrationSession, MilestoneMap, MilestoneRef, PlannedAction, PlannedIssue};
pub use source::{
    Attachment, JournalDetail, JournalEntry, RedmineClient, SourceError, SourceIssue,
    SourceProject, SourceTracker,
};
pub use summary::{IssueOutcome, RunSummary};
pub use templates::{TemplateError, TemplateRenderer};
pub use transform::{format_timestamp, replace_issue_references, repository_file_url};
