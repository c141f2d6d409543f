//! Composition of destination issues and comments from source issues.
//!
//! Everything here is synchronous and side-effect free; the migrator decides
//! when the composed payloads are sent.

mod status;

pub use status::{is_closed_status, issue_labels, CLOSED_STATUSES};

use crate::attachments::AttachmentLink;
use crate::config::MigrationConfig;
use crate::destination::NewIssue;
use crate::session::IdMap;
use crate::source::{JournalEntry, SourceIssue};
use crate::templates::{CommentBody, IssueBody, TemplateError, TemplateRenderer};
use crate::transform::{format_timestamp, replace_issue_references};

/// Builds the creation payload for a source issue.
///
/// The body holds the reporter header, the description with rewritten
/// references, the attachment list (if any) and the configured footer.
///
/// # Errors
///
/// Returns an error if the body template fails to render.
pub fn compose_issue(
    renderer: &TemplateRenderer,
    config: &MigrationConfig,
    project_name: &str,
    issue: &SourceIssue,
    attachments: &[AttachmentLink],
    id_map: &IdMap,
    milestone: Option<u64>,
) -> Result<NewIssue, TemplateError> {
    let body = renderer.render_issue_body(&IssueBody {
        author: &issue.author,
        created_on: format_timestamp(&issue.created_on),
        description: replace_issue_references(&issue.description, id_map, &config.github.prefix),
        attachments,
        footer: &config.migration.footer,
    })?;

    let assignee = issue
        .assignee
        .as_deref()
        .and_then(|name| config.github_user(name))
        .map(str::to_string);

    Ok(NewIssue {
        title: issue.subject.clone(),
        body,
        labels: issue_labels(project_name, issue),
        milestone,
        assignee,
    })
}

/// Builds the comment for a journal entry, or `None` when it has no note.
///
/// # Errors
///
/// Returns an error if the comment template fails to render.
pub fn compose_comment(
    renderer: &TemplateRenderer,
    config: &MigrationConfig,
    journal: &JournalEntry,
    id_map: &IdMap,
) -> Result<Option<String>, TemplateError> {
    if journal.notes.is_empty() {
        return Ok(None);
    }

    renderer
        .render_comment(&CommentBody {
            author: &journal.author,
            created_on: format_timestamp(&journal.created_on),
            notes: replace_issue_references(&journal.notes, id_map, &config.github.prefix),
        })
        .map(Some)
}
