//! Planned destination numbers for source issues.

use serde::Serialize;

/// What the migration will do with a source issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannedAction {
    /// A new destination issue will be created under the reserved number.
    Create,

    /// An issue with the same title exists; it is treated as already migrated.
    Skip,
}

/// A source issue paired with its destination number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedIssue {
    /// Source issue id.
    pub source_id: u64,

    /// Source issue subject.
    pub title: String,

    /// Existing or reserved destination number.
    pub number: u64,

    pub action: PlannedAction,
}
