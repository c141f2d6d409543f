//! Configuration loading.
//!
//! This module handles parsing the migration TOML file, validating it and
//! normalizing the URLs it contains.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{GitHubSettings, MigrationConfig, MigrationSettings, RedmineSettings};

use crate::attachments::repository_relative;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

impl MigrationConfig {
    /// Loads and validates a configuration file.
    ///
    /// The file layout is:
    /// ```text
    /// [redmine]    url, token, project, upgrade-download-scheme
    /// [github]     token, owner, repository, prefix, branch, respect-rate-limit
    /// [migration]  footer, repository-dir, attachments-dir, creation-delay-ms
    /// [users]      "Redmine Name" = "github-login"
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, invalid, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading configuration");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::parse(&content, &path.display().to_string())
    }

    /// Parses and validates configuration content.
    ///
    /// `origin` names the content in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the content is not valid TOML or fails validation.
    pub fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let mut config: MigrationConfig =
            toml::from_str(content).map_err(|e| ConfigError::TomlError {
                path: origin.to_string(),
                source: e,
            })?;

        config.normalize();
        config.validate(origin)?;

        debug!(
            project = %config.redmine.project,
            owner = %config.github.owner,
            repository = %config.github.repository,
            users = config.users.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Returns the GitHub login mapped to a Redmine display name.
    #[must_use]
    pub fn github_user(&self, redmine_name: &str) -> Option<&str> {
        self.users.get(redmine_name).map(String::as_str)
    }

    /// Returns the pause inserted after each issue creation.
    #[must_use]
    pub fn creation_delay(&self) -> Duration {
        Duration::from_millis(self.migration.creation_delay_ms)
    }

    fn normalize(&mut self) {
        self.redmine.url = self.redmine.url.trim_end_matches('/').to_string();
        self.github.prefix = self.github.prefix.trim_end_matches('/').to_string();
    }

    fn validate(&self, origin: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::ValidationError {
            path: origin.to_string(),
            message,
        };

        if Url::parse(&self.redmine.url).is_err() {
            return Err(invalid(format!(
                "redmine.url is not a valid URL: {}",
                self.redmine.url
            )));
        }

        if Url::parse(&self.github.prefix).is_err() {
            return Err(invalid(format!(
                "github.prefix is not a valid URL: {}",
                self.github.prefix
            )));
        }

        let required = [
            ("redmine.token", &self.redmine.token),
            ("redmine.project", &self.redmine.project),
            ("github.token", &self.github.token),
            ("github.owner", &self.github.owner),
            ("github.repository", &self.github.repository),
            ("github.branch", &self.github.branch),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(invalid(format!("{key} must not be empty")));
            }
        }

        if self.github.branch.contains(char::is_whitespace) {
            return Err(invalid("github.branch must not contain whitespace".to_string()));
        }

        let migration = &self.migration;
        if repository_relative(&migration.attachments_dir, &migration.repository_dir).is_none() {
            return Err(invalid(format!(
                "migration.attachments-dir '{}' is not inside migration.repository-dir '{}'",
                migration.attachments_dir.display(),
                migration.repository_dir.display()
            )));
        }

        Ok(())
    }
}
