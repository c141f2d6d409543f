//! Run summary types.

use super::result::IssueOutcome;

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of issues read from the source.
    pub issues_fetched: usize,

    /// Number of destination issues created.
    pub issues_created: usize,

    /// Number of issues skipped because they were already migrated.
    pub issues_skipped: usize,

    /// Number of created issues that were closed.
    pub issues_closed: usize,

    /// Number of comments created from journal notes.
    pub comments_created: usize,

    /// Number of milestones created at the destination.
    pub milestones_created: usize,

    /// Number of attachments downloaded to local storage.
    pub attachments_saved: usize,

    /// Number of attachments the source no longer has.
    pub attachments_missing: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with an issue outcome.
    pub fn record(&mut self, outcome: &IssueOutcome) {
        match outcome {
            IssueOutcome::Created {
                comments,
                closed,
                milestone_created,
                attachments_saved,
                attachments_missing,
                ..
            } => {
                self.issues_created += 1;
                self.comments_created += comments;
                self.issues_closed += usize::from(*closed);
                self.milestones_created += usize::from(*milestone_created);
                self.attachments_saved += attachments_saved;
                self.attachments_missing += attachments_missing;
            }
            IssueOutcome::Skipped { .. } => self.issues_skipped += 1,
        }
    }

    /// Returns the number of issues handled, created or skipped.
    #[must_use]
    pub fn issues_processed(&self) -> usize {
        self.issues_created + self.issues_skipped
    }
}
