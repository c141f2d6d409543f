//! Attachment discovery, download and link rewriting.
//!
//! Attachments are found through the journal details of an issue, fetched
//! from the source tracker, saved locally and listed in the migrated body
//! with links pointing into the destination repository.

mod error;
mod store;

pub use error::AttachmentError;
pub use store::{repository_relative, AttachmentStore};

use crate::config::MigrationConfig;
use crate::source::{SourceIssue, SourceTracker};
use crate::transform::repository_file_url;
use serde::Serialize;
use tracing::{info, warn};

/// An attachment entry of the "Attached Files" block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentLink {
    pub filename: String,
    /// Link to the stored copy inside the destination repository.
    pub url: String,
}

/// Attachments gathered for a single issue.
#[derive(Debug, Clone, Default)]
pub struct CollectedAttachments {
    /// Links for the issue body, in journal order.
    pub links: Vec<AttachmentLink>,
    /// Attachments written to local storage.
    pub saved: usize,
    /// Attachments the source no longer has.
    pub missing: usize,
}

/// Returns the URL attachment bytes are downloaded from.
///
/// With `upgrade_scheme` set, `http:` URLs are fetched over `https:`.
#[must_use]
pub fn download_url(content_url: &str, upgrade_scheme: bool) -> String {
    match content_url.strip_prefix("http:") {
        Some(rest) if upgrade_scheme => format!("https:{rest}"),
        _ => content_url.to_string(),
    }
}

/// Looks up, downloads and stores every attachment added in the issue's journals.
///
/// Attachments the source reports as not found are skipped with a warning.
///
/// # Errors
///
/// Returns an error for any other lookup, download or storage failure.
pub async fn collect_attachments<S>(
    source: &S,
    store: &AttachmentStore,
    issue: &SourceIssue,
    config: &MigrationConfig,
) -> Result<CollectedAttachments, AttachmentError>
where
    S: SourceTracker + ?Sized,
{
    let mut collected = CollectedAttachments::default();

    for attachment_id in issue.attachment_ids() {
        let attachment = match source.attachment(attachment_id).await {
            Ok(attachment) => attachment,
            Err(e) if e.is_not_found() => {
                warn!(
                    issue_id = issue.id,
                    attachment_id,
                    "Attachment not found, skipping"
                );
                collected.missing += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let repository_path = store.repository_path(issue.id, &attachment)?;
        collected.links.push(AttachmentLink {
            filename: attachment.filename.clone(),
            url: repository_file_url(&config.github.prefix, &config.github.branch, &repository_path),
        });

        let url = download_url(&attachment.content_url, config.redmine.upgrade_download_scheme);
        let bytes = source.download(&url).await?;
        let path = store.save(issue.id, &attachment, &bytes).await?;
        info!(
            issue_id = issue.id,
            attachment_id = attachment.id,
            path = %path.display(),
            "Downloaded attachment"
        );
        collected.saved += 1;
    }

    Ok(collected)
}
