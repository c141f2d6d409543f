//! Status and tracker translation.

use crate::source::SourceIssue;

/// Source statuses that close the migrated issue.
pub const CLOSED_STATUSES: [&str; 4] = ["Closed", "Rejected", "Feedback", "Resolved"];

/// Source tracker name that adds the `bug` label.
const BUG_TRACKER: &str = "Bug";

/// Source status that adds the `wontfix` label.
const REJECTED_STATUS: &str = "Rejected";

/// Returns true if the source status is closed-equivalent.
#[must_use]
pub fn is_closed_status(status: &str) -> bool {
    CLOSED_STATUSES.contains(&status)
}

/// Returns the destination labels for a source issue.
///
/// The project name is always present; `bug` and `wontfix` follow the
/// tracker and status.
#[must_use]
pub fn issue_labels(project_name: &str, issue: &SourceIssue) -> Vec<String> {
    let mut labels = vec![project_name.to_string()];
    if issue.tracker == BUG_TRACKER {
        labels.push("bug".to_string());
    }
    if issue.status == REJECTED_STATUS {
        labels.push("wontfix".to_string());
    }
    labels
}
