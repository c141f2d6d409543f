//! Attachment error types.

use crate::source::SourceError;
use thiserror::Error;

/// Errors that can occur while fetching or storing attachments.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// Lookup or download failed for a reason other than a missing attachment.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Failed to write to local storage.
    #[error("Failed to write attachment '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The attachment directory is not inside the repository checkout.
    #[error("Attachment path '{path}' is outside the repository '{repository}'")]
    OutsideRepository { path: String, repository: String },

    /// The attachment has no usable file name.
    #[error("Attachment {id} has an unusable file name: '{filename}'")]
    InvalidFileName { id: u64, filename: String },
}
