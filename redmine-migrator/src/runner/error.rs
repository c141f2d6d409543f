//! Runner error types.

/// Errors that abort a migration run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Source tracker errors.
    #[error(transparent)]
    Source(#[from] crate::source::SourceError),

    /// Destination tracker errors.
    #[error(transparent)]
    Destination(#[from] crate::destination::DestinationError),

    /// Attachment lookup, download or storage errors.
    #[error(transparent)]
    Attachment(#[from] crate::attachments::AttachmentError),

    /// Body rendering errors.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),
}
