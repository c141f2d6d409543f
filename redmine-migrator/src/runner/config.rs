//! Runner configuration.

use std::path::{Path, PathBuf};

/// Configuration for a migration run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path to the migration TOML file.
    config_path: PathBuf,
    /// Whether to preview the mapping without writing anything.
    dry_run: bool,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(config_path: PathBuf, dry_run: bool) -> Self {
        Self {
            config_path,
            dry_run,
        }
    }

    /// Returns the migration TOML file path.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}
