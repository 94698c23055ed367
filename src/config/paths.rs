//! Path resolution for focusflow configuration and data files.
//!
//! All focusflow data is stored in `~/.focusflow/`:
//! - `config.yaml` - CLI configuration file
//! - `focusflow.db` - SQLite database (tasks, projects, sessions, finance)
//! - `backups/` - default location for exported data bundles

use std::path::PathBuf;

use crate::error::FlowError;

/// Paths to focusflow configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.focusflow/`
    pub root: PathBuf,
    /// Config file: `~/.focusflow/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.focusflow/focusflow.db`
    pub database: PathBuf,
    /// Backups directory: `~/.focusflow/backups/`
    pub backups: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, FlowError> {
        let home = std::env::var("HOME")
            .map_err(|_| FlowError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".focusflow")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("focusflow.db"),
            backups: root.join("backups"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), FlowError> {
        for dir in [&self.root, &self.backups] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    FlowError::Config(format!("Failed to create directory {:?}: {}", dir, e))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".focusflow"))
        })
    }
}
