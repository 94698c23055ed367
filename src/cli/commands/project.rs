//! Project subcommands.

use chrono::Utc;
use colored::Colorize;
use uuid::Uuid;

use crate::cli::args::{OutputFormat, ProjectCommands};
use crate::error::FlowError;
use crate::output::format_projects;
use crate::storage::{projects, Database, Project};

/// Execute project subcommands.
///
/// # Errors
///
/// Returns an error if the target cannot be resolved or the database
/// operation fails.
pub fn project(
    db: &Database,
    cmd: ProjectCommands,
    format: OutputFormat,
) -> Result<String, FlowError> {
    match cmd {
        ProjectCommands::Add {
            name,
            color,
            priority,
        } => {
            let new_project = Project {
                id: Uuid::new_v4().to_string(),
                name,
                color,
                priority,
                created_at: Utc::now().timestamp_millis(),
            };
            projects::add(db, &new_project)?;
            Ok(format!(
                "{} {} (ID: {})",
                "Created project:".green().bold(),
                new_project.name,
                new_project.id.dimmed()
            ))
        }
        ProjectCommands::List => format_projects(&projects::list(db)?, format),
        ProjectCommands::Rename { id, name } => {
            let id = projects::resolve_id(db, &id)?;
            projects::rename(db, &id, &name)?;
            Ok(format!("Renamed project: {id}"))
        }
        ProjectCommands::Priority { id, priority } => {
            let id = projects::resolve_id(db, &id)?;
            projects::set_priority(db, &id, priority)?;
            Ok(format!("Set priority {priority} on project: {id}"))
        }
        ProjectCommands::Delete { id } => {
            let id = projects::resolve_id(db, &id)?;
            projects::delete(db, &id)?;
            Ok(format!("Deleted project: {id}"))
        }
    }
}
