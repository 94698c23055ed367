//! Task subcommands.

use chrono::Utc;

use crate::cli::args::{OutputFormat, TaskCommands};
use crate::error::FlowError;
use crate::output::{format_task, format_tasks};
use crate::storage::{projects, tasks, Database, Status};

use super::parse_deadline_phrase;

/// Execute task subcommands.
///
/// # Errors
///
/// Returns an error if the target cannot be resolved or the database
/// operation fails.
pub fn task(db: &Database, cmd: TaskCommands, format: OutputFormat) -> Result<String, FlowError> {
    match cmd {
        TaskCommands::List {
            status,
            project,
            limit,
        } => {
            let project_id = project
                .map(|p| projects::resolve_id(db, &p))
                .transpose()?;
            let tasks = tasks::list(db, status, project_id.as_deref(), limit)?;
            format_tasks(&tasks, "Tasks", format)
        }
        TaskCommands::Show { id } => {
            let id = tasks::resolve_id(db, &id)?;
            format_task(&tasks::get(db, &id)?, format)
        }
        TaskCommands::Start { id } => {
            let id = tasks::resolve_id(db, &id)?;
            tasks::set_status(db, &id, Status::Doing, Utc::now().timestamp_millis())?;
            Ok(format!("Started task: {id}"))
        }
        TaskCommands::Done { id } => {
            let id = tasks::resolve_id(db, &id)?;
            tasks::set_status(db, &id, Status::Done, Utc::now().timestamp_millis())?;
            Ok(format!("Completed task: {id}"))
        }
        TaskCommands::Reopen { id } => {
            let id = tasks::resolve_id(db, &id)?;
            tasks::set_status(db, &id, Status::Todo, Utc::now().timestamp_millis())?;
            Ok(format!("Reopened task: {id}"))
        }
        TaskCommands::Rename { id, title } => {
            let id = tasks::resolve_id(db, &id)?;
            tasks::rename(db, &id, &title)?;
            Ok(format!("Renamed task: {id}"))
        }
        TaskCommands::Priority { id, priority } => {
            let id = tasks::resolve_id(db, &id)?;
            tasks::set_priority(db, &id, priority)?;
            Ok(format!("Set priority {priority} on task: {id}"))
        }
        TaskCommands::Tag { id, tags } => {
            let id = tasks::resolve_id(db, &id)?;
            tasks::set_tags(db, &id, &tags)?;
            Ok(format!("Set {} tag(s) on task: {id}", tags.len()))
        }
        TaskCommands::Deadline { id, when } => {
            let id = tasks::resolve_id(db, &id)?;
            let phrase = when.join(" ");
            let now_ms = Utc::now().timestamp_millis();

            if phrase.eq_ignore_ascii_case("clear") {
                tasks::set_deadline(db, &id, None, now_ms)?;
                return Ok(format!("Cleared deadline on task: {id}"));
            }

            let deadline = parse_deadline_phrase(&phrase)?;
            tasks::set_deadline(db, &id, Some(deadline), now_ms)?;
            Ok(format!("Set deadline on task: {id}"))
        }
        TaskCommands::Delete { id } => {
            let id = tasks::resolve_id(db, &id)?;
            tasks::delete(db, &id)?;
            Ok(format!("Deleted task: {id}"))
        }
    }
}
