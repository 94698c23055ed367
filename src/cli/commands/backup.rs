//! Backup export/import subcommands.

use std::path::PathBuf;

use chrono::{Local, Utc};
use colored::Colorize;

use crate::cli::args::BackupCommands;
use crate::config::Paths;
use crate::error::FlowError;
use crate::storage::backup as bundle_store;
use crate::storage::{Backup, Database};

/// Execute backup subcommands.
///
/// # Errors
///
/// Returns an error if the file cannot be read/written or the bundle is
/// invalid.
pub fn backup(db: &Database, cmd: BackupCommands) -> Result<String, FlowError> {
    match cmd {
        BackupCommands::Export { path } => {
            let path = match path {
                Some(path) => path,
                None => default_export_path()?,
            };

            let bundle = bundle_store::export(db, Utc::now().timestamp_millis())?;
            let json = serde_json::to_string_pretty(&bundle)?;
            std::fs::write(&path, json)?;

            Ok(format!(
                "{} {} tasks, {} projects, {} transactions -> {}",
                "Exported:".green().bold(),
                bundle.tasks.len(),
                bundle.projects.len(),
                bundle.transactions.len(),
                path.display()
            ))
        }
        BackupCommands::Import { path } => {
            let contents = std::fs::read_to_string(&path)?;
            let bundle: Backup = serde_json::from_str(&contents)?;

            bundle_store::import(db, &bundle, Utc::now().timestamp_millis())?;

            Ok(format!(
                "{} {} tasks, {} projects, {} transactions from {}",
                "Imported:".green().bold(),
                bundle.tasks.len(),
                bundle.projects.len(),
                bundle.transactions.len(),
                path.display()
            ))
        }
    }
}

fn default_export_path() -> Result<PathBuf, FlowError> {
    let paths = Paths::new()?;
    paths.ensure_dirs()?;

    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    Ok(paths.backups.join(format!("focusflow-{stamp}.json")))
}
