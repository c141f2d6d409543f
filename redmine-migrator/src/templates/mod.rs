//! Body rendering using Handlebars.
//!
//! Migrated issue bodies and comments are rendered from fixed templates that
//! reproduce the layout of the original tracker's export: an attribution
//! header, the rewritten text, an optional attachment list and a footer.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, CommentBody, IssueBody, TemplateRenderer};

/// Template for migrated issue bodies.
pub const ISSUE_BODY_TEMPLATE: &str = concat!(
    "<b>Reported by {{author}} on {{created_on}}</b><br/>{{description}}",
    "{{#if attachments}}<hr><b>Attached Files: </b><br/>\r\n\r\n",
    "{{#each attachments}}* <a href=\"{{url}}\">{{filename}}</a> \r\n{{/each}}",
    "{{/if}}<hr>{{footer}}"
);

/// Template for migrated journal notes.
pub const COMMENT_TEMPLATE: &str =
    "<b>Comment by {{author}} on {{created_on}}</b><br/>{{notes}}";
