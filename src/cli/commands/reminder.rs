//! Reminder subcommands.

use chrono::Utc;

use crate::cli::args::{OutputFormat, ReminderCommands};
use crate::error::FlowError;
use crate::output::format_tasks;
use crate::storage::{reminders, tasks, Database};

use super::parse_deadline_phrase;

/// Execute reminder subcommands.
///
/// # Errors
///
/// Returns an error if the target cannot be resolved or the database
/// operation fails.
pub fn reminder(
    db: &Database,
    cmd: ReminderCommands,
    format: OutputFormat,
) -> Result<String, FlowError> {
    match cmd {
        ReminderCommands::Set { id, when } => {
            let id = tasks::resolve_id(db, &id)?;
            let phrase = when.join(" ");
            let remind_at = parse_deadline_phrase(&phrase)?;
            reminders::set(db, &id, Some(remind_at))?;
            Ok(format!("Reminder set on task: {id}"))
        }
        ReminderCommands::Clear { id } => {
            let id = tasks::resolve_id(db, &id)?;
            reminders::set(db, &id, None)?;
            Ok(format!("Reminder cleared on task: {id}"))
        }
        ReminderCommands::Snooze { id, minutes } => {
            let id = tasks::resolve_id(db, &id)?;
            reminders::snooze(db, &id, minutes, Utc::now().timestamp_millis())?;
            Ok(format!("Reminder snoozed {minutes} min on task: {id}"))
        }
        ReminderCommands::Due => {
            let due = reminders::due(db, Utc::now().timestamp_millis())?;
            format_tasks(&due, "Due reminders", format)
        }
        ReminderCommands::Ack { ids } => {
            let mut resolved = Vec::with_capacity(ids.len());
            for id in &ids {
                resolved.push(tasks::resolve_id(db, id)?);
            }
            reminders::acknowledge(db, &resolved, Utc::now().timestamp_millis())?;
            Ok(format!("Acknowledged {} reminder(s)", resolved.len()))
        }
    }
}
