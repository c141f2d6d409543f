//! Configuration sections deserialized from the migration TOML file.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Connection details for the Redmine instance issues are read from.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RedmineSettings {
    /// Base URL of the Redmine site, without a trailing slash.
    pub url: String,

    /// REST API key sent as `X-Redmine-API-Key`.
    pub token: String,

    /// Project identifier (e.g. "my-project").
    pub project: String,

    /// Rewrites `http:` attachment URLs to `https:` before downloading.
    #[serde(default = "default_upgrade_download_scheme")]
    pub upgrade_download_scheme: bool,
}

/// Connection details for the GitHub repository issues are written to.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitHubSettings {
    /// Personal access token with `repo` scope.
    pub token: String,

    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub repository: String,

    /// Web URL of the repository, used to build issue and file links.
    pub prefix: String,

    /// Branch the downloaded attachments are committed to.
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Waits for the core rate limit to reset when it is nearly exhausted.
    #[serde(default)]
    pub respect_rate_limit: bool,
}

/// Settings that shape the migrated content.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MigrationSettings {
    /// Text appended to every migrated issue body.
    pub footer: String,

    /// Local checkout of the destination repository.
    #[serde(default = "default_repository_dir")]
    pub repository_dir: PathBuf,

    /// Directory attachments are downloaded into; must lie inside `repository_dir`.
    #[serde(default = "default_attachments_dir")]
    pub attachments_dir: PathBuf,

    /// Pause after each issue creation, in milliseconds.
    #[serde(default = "default_creation_delay_ms")]
    pub creation_delay_ms: u64,
}

/// The full migration configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MigrationConfig {
    /// Source tracker settings.
    pub redmine: RedmineSettings,

    /// Destination tracker settings.
    pub github: GitHubSettings,

    /// Content and pacing settings.
    pub migration: MigrationSettings,

    /// Redmine display name to GitHub login.
    #[serde(default)]
    pub users: HashMap<String, String>,
}

fn default_upgrade_download_scheme() -> bool {
    true
}

pub(crate) fn default_branch() -> String {
    "master".to_string()
}

pub(crate) fn default_repository_dir() -> PathBuf {
    PathBuf::from(".")
}

pub(crate) fn default_attachments_dir() -> PathBuf {
    PathBuf::from("attachments/download")
}

pub(crate) fn default_creation_delay_ms() -> u64 {
    250
}
