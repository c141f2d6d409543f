//! Source tracker data model.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Detail property marking an attachment addition.
pub const ATTACHMENT_PROPERTY: &str = "attachment";

/// The source project issues are migrated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceProject {
    /// Numeric project id.
    pub id: u64,

    /// Project identifier used in URLs.
    pub identifier: String,

    /// Display name, also used as a label at the destination.
    pub name: String,
}

/// An issue read from the source tracker, journals included.
#[derive(Debug, Clone)]
pub struct SourceIssue {
    pub id: u64,
    pub subject: String,
    pub description: String,
    pub author: String,
    pub created_on: DateTime<Utc>,
    pub status: String,
    pub tracker: String,
    /// Target version name, mapped to a destination milestone.
    pub milestone: Option<String>,
    /// Assignee display name.
    pub assignee: Option<String>,
    pub journals: Vec<JournalEntry>,
}

impl SourceIssue {
    /// Iterates over the attachment ids added in any journal, in journal order.
    pub fn attachment_ids(&self) -> impl Iterator<Item = &str> {
        self.journals
            .iter()
            .flat_map(|journal| journal.details.iter())
            .filter_map(JournalDetail::attachment_id)
    }
}

/// One entry of an issue's change history.
#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub author: String,
    pub created_on: DateTime<Utc>,
    /// Free-text note, empty when the entry only changed fields.
    pub notes: String,
    pub details: Vec<JournalDetail>,
}

/// A single field change recorded in a journal entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JournalDetail {
    #[serde(default)]
    pub property: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub old_value: Option<String>,
    #[serde(default)]
    pub new_value: Option<String>,
}

impl JournalDetail {
    /// Returns the attachment id if this detail records an added attachment.
    #[must_use]
    pub fn attachment_id(&self) -> Option<&str> {
        (self.property == ATTACHMENT_PROPERTY).then_some(self.name.as_str())
    }
}

/// Attachment metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub id: u64,
    pub filename: String,
    pub content_url: String,
}
