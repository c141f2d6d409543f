//! Per-issue migration outcomes.

use serde::Serialize;

/// Result of migrating a single source issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IssueOutcome {
    /// A destination issue was created.
    Created {
        /// Source issue id.
        source_id: u64,
        /// Destination issue number.
        number: u64,
        /// Comments replayed from journals.
        comments: usize,
        /// Whether the issue was closed after creation.
        closed: bool,
        /// Whether the issue's milestone had to be created.
        milestone_created: bool,
        /// Attachments saved to local storage.
        attachments_saved: usize,
        /// Attachments the source no longer has.
        attachments_missing: usize,
    },

    /// An issue with the same title already exists at the destination.
    Skipped {
        /// Source issue id.
        source_id: u64,
        /// Number of the existing destination issue.
        existing: u64,
    },
}
