//! Template renderer.

use super::{TemplateError, COMMENT_TEMPLATE, ISSUE_BODY_TEMPLATE};
use crate::attachments::AttachmentLink;
use handlebars::{no_escape, Handlebars};
use serde::Serialize;

const ISSUE_BODY: &str = "issue_body";
const COMMENT: &str = "comment";

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (bodies already contain markup)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    // Bodies are HTML fragments; escaping would mangle rewritten links
    hbs.register_escape_fn(no_escape);

    // Enable strict mode to catch missing variables
    hbs.set_strict_mode(true);

    hbs
}

/// Values substituted into [`ISSUE_BODY_TEMPLATE`].
#[derive(Debug, Clone, Serialize)]
pub struct IssueBody<'a> {
    /// Reporter display name.
    pub author: &'a str,
    /// Formatted creation timestamp.
    pub created_on: String,
    /// Description with references already rewritten.
    pub description: String,
    /// Attachments listed under "Attached Files"; the block is omitted when empty.
    pub attachments: &'a [AttachmentLink],
    pub footer: &'a str,
}

/// Values substituted into [`COMMENT_TEMPLATE`].
#[derive(Debug, Clone, Serialize)]
pub struct CommentBody<'a> {
    pub author: &'a str,
    pub created_on: String,
    /// Journal note with references already rewritten.
    pub notes: String,
}

/// Renderer for migrated issue bodies and comments.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Creates a renderer with the body and comment templates registered.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to parse.
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = create_handlebars_registry();
        handlebars.register_template_string(ISSUE_BODY, ISSUE_BODY_TEMPLATE)?;
        handlebars.register_template_string(COMMENT, COMMENT_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    /// Renders a migrated issue body.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_issue_body(&self, body: &IssueBody<'_>) -> Result<String, TemplateError> {
        Ok(self.handlebars.render(ISSUE_BODY, body)?)
    }

    /// Renders a migrated journal note.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_comment(&self, comment: &CommentBody<'_>) -> Result<String, TemplateError> {
        Ok(self.handlebars.render(COMMENT, comment)?)
    }
}
