//! Source tracker error types.

use thiserror::Error;

/// Errors that can occur while reading from the source tracker.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport or decoding error.
    #[error("Redmine request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested resource does not exist.
    #[error("Redmine resource not found: {resource}")]
    NotFound { resource: String },

    /// Redmine answered with a non-success status.
    #[error("Redmine API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl SourceError {
    /// Returns true if the error is a missing resource.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound { .. })
    }
}
