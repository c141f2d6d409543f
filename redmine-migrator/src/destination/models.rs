//! Destination tracker data model.

/// An issue (or pull request) already present at the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingIssue {
    /// Destination-assigned number, shared with pull requests.
    pub number: u64,
    pub title: String,
    /// Pull requests occupy numbers but are never matched by title.
    pub is_pull_request: bool,
}

/// A milestone at the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    pub number: u64,
    pub title: String,
}

/// Payload for creating an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    pub milestone: Option<u64>,
    pub assignee: Option<String>,
}
