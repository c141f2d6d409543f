//! Body rendering error types.

/// Errors raised while building issue bodies and comments.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A body or comment failed to render.
    #[error("Failed to render migrated content: {0}")]
    RenderError(#[from] handlebars::RenderError),

    /// A built-in template failed to register.
    #[error("Failed to register body template: {0}")]
    RegistrationError(#[from] handlebars::TemplateError),
}
