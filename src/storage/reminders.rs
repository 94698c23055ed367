//! Deadline reminder scheduling.
//!
//! Reminders live on the task rows: `remind_at` is when the reminder is
//! due, `reminded_at` records acknowledgement. Delivery (notifications,
//! toasts) is somebody else's job; this module only keeps the timestamps.

use rusqlite::params;

use crate::error::FlowError;
use crate::storage::types::Task;
use crate::storage::Database;

/// Compute a reminder time: `lead_minutes` before the deadline, clamped to
/// `now_ms` so it never schedules into the past.
#[must_use]
pub fn remind_at_for(deadline: i64, lead_minutes: u32, now_ms: i64) -> i64 {
    let lead_ms = i64::from(lead_minutes) * 60_000;
    (deadline - lead_ms).max(now_ms)
}

/// Set or clear a task's reminder time. Resets the acknowledgement stamp.
///
/// # Errors
///
/// Returns `NotFound` if no task has that id.
pub fn set(db: &Database, task_id: &str, remind_at: Option<i64>) -> Result<(), FlowError> {
    let affected = db
        .connection()
        .execute(
            "UPDATE tasks SET remind_at = ?1, reminded_at = NULL WHERE id = ?2",
            params![remind_at, task_id],
        )
        .map_err(|e| FlowError::Database(format!("Failed to set reminder: {e}")))?;

    if affected == 0 {
        Err(FlowError::NotFound(format!("task {task_id}")))
    } else {
        Ok(())
    }
}

/// Push a task's reminder `minutes` into the future (minimum one minute).
///
/// # Errors
///
/// Returns `NotFound` if no task has that id.
pub fn snooze(db: &Database, task_id: &str, minutes: i64, now_ms: i64) -> Result<(), FlowError> {
    let next = now_ms + minutes.max(1) * 60_000;
    set(db, task_id, Some(next))
}

/// List tasks whose reminder is due: not done, `remind_at` in the past,
/// oldest first, capped at 20.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn due(db: &Database, now_ms: i64) -> Result<Vec<Task>, FlowError> {
    let conn = db.connection();
    let mut stmt = conn
        .prepare(
            "SELECT id, project_id, title, description, priority, status, created_at,
                    completed_at, deadline, estimated_minutes, actual_minutes, tags,
                    remind_at, reminded_at
             FROM tasks
             WHERE status != 2
               AND remind_at IS NOT NULL
               AND remind_at <= ?1
             ORDER BY remind_at ASC
             LIMIT 20",
        )
        .map_err(|e| FlowError::Database(format!("Failed to prepare reminder query: {e}")))?;

    let iter = stmt
        .query_map(params![now_ms], super::tasks::task_from_row)
        .map_err(|e| FlowError::Database(format!("Failed to query reminders: {e}")))?;

    let mut due_tasks = Vec::new();
    for task in iter {
        due_tasks
            .push(task.map_err(|e| FlowError::Database(format!("Failed to read reminder: {e}")))?);
    }
    Ok(due_tasks)
}

/// Acknowledge fired reminders: stamp `reminded_at` and clear `remind_at`.
///
/// # Errors
///
/// Returns an error if the transaction fails.
pub fn acknowledge(db: &Database, task_ids: &[String], now_ms: i64) -> Result<(), FlowError> {
    if task_ids.is_empty() {
        return Ok(());
    }

    let conn = db.connection();
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| FlowError::Database(format!("Failed to begin transaction: {e}")))?;

    for id in task_ids {
        tx.execute(
            "UPDATE tasks SET reminded_at = ?1, remind_at = NULL WHERE id = ?2",
            params![now_ms, id],
        )
        .map_err(|e| FlowError::Database(format!("Failed to acknowledge reminder: {e}")))?;
    }

    tx.commit()
        .map_err(|e| FlowError::Database(format!("Failed to commit: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Priority;
    use crate::storage::tasks;
    use crate::storage::types::{NewTask, Status};

    fn seed_task(db: &Database, id: &str, remind_at: Option<i64>) {
        let task = NewTask {
            id: id.to_string(),
            project_id: None,
            title: format!("Task {id}"),
            description: None,
            priority: Priority::Normal,
            status: Status::Todo,
            created_at: 1,
            deadline: None,
            estimated_minutes: None,
            actual_minutes: None,
            tags: vec![],
            remind_at,
        };
        tasks::add(db, &task).unwrap();
    }

    #[test]
    fn test_remind_at_for_applies_lead() {
        assert_eq!(remind_at_for(10_000_000, 30, 0), 10_000_000 - 30 * 60_000);
    }

    #[test]
    fn test_remind_at_for_clamps_to_now() {
        let now = 9_999_000;
        assert_eq!(remind_at_for(10_000_000, 30, now), now);
    }

    #[test]
    fn test_due_returns_past_reminders_oldest_first() {
        let db = Database::open_in_memory().unwrap();
        seed_task(&db, "late", Some(1000));
        seed_task(&db, "later", Some(2000));
        seed_task(&db, "future", Some(99_000));
        seed_task(&db, "none", None);

        let tasks = due(&db, 5000).unwrap();
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["late", "later"]);
    }

    #[test]
    fn test_done_tasks_never_remind() {
        let db = Database::open_in_memory().unwrap();
        seed_task(&db, "t1", Some(1000));
        tasks::set_status(&db, "t1", Status::Done, 2000).unwrap();

        assert!(due(&db, 5000).unwrap().is_empty());
    }

    #[test]
    fn test_acknowledge_clears_remind_at() {
        let db = Database::open_in_memory().unwrap();
        seed_task(&db, "t1", Some(1000));

        acknowledge(&db, &["t1".to_string()], 5000).unwrap();

        let stored = tasks::get(&db, "t1").unwrap();
        assert!(stored.remind_at.is_none());
        assert_eq!(stored.reminded_at, Some(5000));
        assert!(due(&db, 9000).unwrap().is_empty());
    }

    #[test]
    fn test_snooze_moves_reminder_forward() {
        let db = Database::open_in_memory().unwrap();
        seed_task(&db, "t1", Some(1000));

        snooze(&db, "t1", 10, 5000).unwrap();

        let stored = tasks::get(&db, "t1").unwrap();
        assert_eq!(stored.remind_at, Some(5000 + 10 * 60_000));
    }

    #[test]
    fn test_snooze_minimum_one_minute() {
        let db = Database::open_in_memory().unwrap();
        seed_task(&db, "t1", Some(1000));

        snooze(&db, "t1", 0, 5000).unwrap();

        let stored = tasks::get(&db, "t1").unwrap();
        assert_eq!(stored.remind_at, Some(5000 + 60_000));
    }
}
