//! Local attachment storage.

use super::AttachmentError;
use crate::source::Attachment;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Returns `path` relative to `repository`, or `None` if it lies outside.
///
/// `.` components are ignored and `..` is never accepted, so the result can
/// be used as a path inside the repository tree.
#[must_use]
pub fn repository_relative(path: &Path, repository: &Path) -> Option<PathBuf> {
    let clean = |path: &Path| {
        path.components()
            .filter(|component| !matches!(component, Component::CurDir))
            .collect::<PathBuf>()
    };
    let (path, repository) = (clean(path), clean(repository));
    if path.is_absolute() != repository.is_absolute() {
        return None;
    }

    let relative = path.strip_prefix(&repository).ok()?;
    relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
        .then(|| relative.to_path_buf())
}

/// Saves attachment bytes under `{root}/{issue_id}/{attachment_id}/{filename}`.
///
/// `root` lies inside a checkout of the destination repository, so every
/// stored file also has a path relative to that checkout.
#[derive(Debug, Clone)]
pub struct AttachmentStore {
    root: PathBuf,
    repository: PathBuf,
}

impl AttachmentStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, repository: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            repository: repository.into(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns where an attachment of a source issue is stored.
    ///
    /// Only the last path component of the file name is used.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentError::InvalidFileName`] if nothing usable remains.
    pub fn path_for(&self, issue_id: u64, attachment: &Attachment) -> Result<PathBuf, AttachmentError> {
        let filename = attachment
            .filename
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim();

        if filename.is_empty() || filename == "." || filename == ".." {
            return Err(AttachmentError::InvalidFileName {
                id: attachment.id,
                filename: attachment.filename.clone(),
            });
        }

        Ok(self
            .root
            .join(issue_id.to_string())
            .join(attachment.id.to_string())
            .join(filename))
    }

    /// Returns the `/`-separated path of a stored attachment relative to the
    /// repository checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the file name is unusable or the store root lies
    /// outside the repository.
    pub fn repository_path(
        &self,
        issue_id: u64,
        attachment: &Attachment,
    ) -> Result<String, AttachmentError> {
        let path = self.path_for(issue_id, attachment)?;
        let relative = repository_relative(&path, &self.repository).ok_or_else(|| {
            AttachmentError::OutsideRepository {
                path: path.display().to_string(),
                repository: self.repository.display().to_string(),
            }
        })?;

        Ok(relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"))
    }

    /// Writes attachment bytes, creating directories on demand.
    ///
    /// # Errors
    ///
    /// Returns an error if the file name is unusable or the write fails.
    pub async fn save(
        &self,
        issue_id: u64,
        attachment: &Attachment,
        bytes: &[u8],
    ) -> Result<PathBuf, AttachmentError> {
        let path = self.path_for(issue_id, attachment)?;
        let io_error = |source| AttachmentError::IoError {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        tokio::fs::write(&path, bytes).await.map_err(io_error)?;

        debug!(path = %path.display(), size = bytes.len(), "Saved attachment");
        Ok(path)
    }
}
