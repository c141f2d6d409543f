//! Destination tracker error types.

use thiserror::Error;

/// Errors that can occur while writing to the destination tracker.
#[derive(Debug, Error)]
pub enum DestinationError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The destination rejected or lost a write.
    #[error("Destination rejected {operation}: {message}")]
    Rejected { operation: String, message: String },
}
