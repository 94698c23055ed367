//! Focus queue and session subcommands.

use chrono::Utc;
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{FocusCommands, OutputFormat};
use crate::core::sort_for_focus;
use crate::error::FlowError;
use crate::output::{format_task, format_tasks};
use crate::storage::{projects, sessions, settings, tasks, Database, Status, Task};

/// Execute focus subcommands.
///
/// # Errors
///
/// Returns an error if the target cannot be resolved or the database
/// operation fails.
pub fn focus(db: &Database, cmd: FocusCommands, format: OutputFormat) -> Result<String, FlowError> {
    match cmd {
        FocusCommands::Queue { project } => {
            let queue = focus_queue(db, project.as_deref())?;
            format_tasks(&queue, "Focus queue", format)
        }
        FocusCommands::Next { project } => {
            let queue = focus_queue(db, project.as_deref())?;
            queue.first().map_or_else(
                || Ok("Nothing to focus on - the queue is empty".to_string()),
                |head| format_task(head, format),
            )
        }
        FocusCommands::Start { task_id } => {
            let task_id = tasks::resolve_id(db, &task_id)?;
            let task = tasks::get(db, &task_id)?;
            let session = sessions::start(db, &task_id, Utc::now().timestamp_millis())?;
            let pomodoro = settings::get(db)?.pomodoro_length;

            match format {
                OutputFormat::Json => {
                    let output = json!({
                        "started": true,
                        "session_id": session.id,
                        "task_id": task.id,
                        "task_title": task.title,
                        "suggested_minutes": pomodoro,
                    });
                    Ok(serde_json::to_string_pretty(&output)?)
                }
                OutputFormat::Pretty => Ok(format!(
                    "{} {}\n  {} {}\n  {} {} min",
                    "Focusing on:".green().bold(),
                    task.title.bold(),
                    "Session:".cyan(),
                    session.id,
                    "Suggested:".dimmed(),
                    pomodoro
                )),
            }
        }
        FocusCommands::Finish {
            session_id,
            minutes,
        } => {
            sessions::finish(db, &session_id, minutes, true, Utc::now().timestamp_millis())?;
            Ok(format!("Session completed: {minutes} min logged"))
        }
        FocusCommands::Cancel {
            session_id,
            minutes,
        } => {
            sessions::finish(db, &session_id, minutes, false, Utc::now().timestamp_millis())?;
            Ok(format!("Session cancelled: {minutes} min logged"))
        }
    }
}

/// Build the queue: everything not done, optionally scoped to a project,
/// handed to the sorter.
fn focus_queue(db: &Database, project: Option<&str>) -> Result<Vec<Task>, FlowError> {
    let project_id = project.map(|p| projects::resolve_id(db, p)).transpose()?;

    let pending: Vec<Task> = tasks::list(db, None, project_id.as_deref(), None)?
        .into_iter()
        .filter(|t| t.status != Status::Done)
        .collect();

    Ok(sort_for_focus(&pending))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Priority;
    use crate::storage::NewTask;

    fn seed(db: &Database, id: &str, priority: Priority, deadline: Option<i64>, created_at: i64) {
        tasks::add(
            db,
            &NewTask {
                id: id.to_string(),
                project_id: None,
                title: format!("Task {id}"),
                description: None,
                priority,
                status: Status::Todo,
                created_at,
                deadline,
                estimated_minutes: None,
                actual_minutes: None,
                tags: vec![],
                remind_at: None,
            },
        )
        .unwrap();
    }

    #[test]
    fn test_queue_orders_and_skips_done() {
        let db = Database::open_in_memory().unwrap();
        seed(&db, "low", Priority::Low, None, 1);
        seed(&db, "high", Priority::High, None, 2);
        seed(&db, "urgent", Priority::High, Some(1000), 3);
        seed(&db, "finished", Priority::High, Some(500), 4);
        tasks::set_status(&db, "finished", Status::Done, 10).unwrap();

        let queue = focus_queue(&db, None).unwrap();
        let ids: Vec<&str> = queue.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["urgent", "high", "low"]);
    }

    #[test]
    fn test_next_on_empty_queue() {
        let db = Database::open_in_memory().unwrap();
        let out = focus(
            &db,
            FocusCommands::Next { project: None },
            OutputFormat::Pretty,
        )
        .unwrap();
        assert!(out.contains("queue is empty"));
    }

    #[test]
    fn test_start_and_finish_session_round_trip() {
        let db = Database::open_in_memory().unwrap();
        seed(&db, "t1", Priority::Normal, None, 1);

        let out = focus(
            &db,
            FocusCommands::Start {
                task_id: "t1".to_string(),
            },
            OutputFormat::Json,
        )
        .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        let session_id = parsed["session_id"].as_str().unwrap().to_string();

        let out = focus(
            &db,
            FocusCommands::Finish {
                session_id,
                minutes: 25,
            },
            OutputFormat::Pretty,
        )
        .unwrap();
        assert!(out.contains("25 min"));
    }
}
