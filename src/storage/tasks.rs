//! Task storage operations.

use rusqlite::{params, OptionalExtension, Row};

use crate::core::Priority;
use crate::error::FlowError;
use crate::storage::types::{NewTask, Status, Task};
use crate::storage::Database;

use super::{reminders, settings};

const TASK_COLUMNS: &str = "id, project_id, title, description, priority, status, created_at, \
                            completed_at, deadline, estimated_minutes, actual_minutes, tags, \
                            remind_at, reminded_at";

pub(super) fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        priority: Priority::from_int(row.get(4)?),
        status: Status::from_int(row.get(5)?),
        created_at: row.get(6)?,
        completed_at: row.get(7)?,
        deadline: row.get(8)?,
        estimated_minutes: row.get(9)?,
        actual_minutes: row.get(10)?,
        tags: serde_json::from_str(&row.get::<_, String>(11)?).unwrap_or_default(),
        remind_at: row.get(12)?,
        reminded_at: row.get(13)?,
    })
}

fn expect_task(affected: usize, id: &str) -> Result<(), FlowError> {
    if affected == 0 {
        Err(FlowError::NotFound(format!("task {id}")))
    } else {
        Ok(())
    }
}

/// Insert a new task and return the stored row.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g. an unknown project id).
pub fn add(db: &Database, task: &NewTask) -> Result<Task, FlowError> {
    let tags_json = serde_json::to_string(&task.tags)?;

    db.connection()
        .execute(
            "INSERT INTO tasks (id, project_id, title, description, priority, status,
                                created_at, deadline, estimated_minutes, actual_minutes,
                                tags, remind_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                task.id,
                task.project_id,
                task.title,
                task.description,
                task.priority.as_int(),
                task.status.as_int(),
                task.created_at,
                task.deadline,
                task.estimated_minutes,
                task.actual_minutes,
                tags_json,
                task.remind_at,
            ],
        )
        .map_err(|e| FlowError::Database(format!("Failed to insert task: {e}")))?;

    get(db, &task.id)
}

/// Load a task by id.
///
/// # Errors
///
/// Returns `NotFound` if no task has that id.
pub fn get(db: &Database, id: &str) -> Result<Task, FlowError> {
    db.connection()
        .query_row(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
            params![id],
            task_from_row,
        )
        .optional()
        .map_err(|e| FlowError::Database(format!("Failed to load task: {e}")))?
        .ok_or_else(|| FlowError::NotFound(format!("task {id}")))
}

/// Resolve a task id from a full id or a unique prefix.
///
/// # Errors
///
/// Returns `NotFound` when nothing matches and `InvalidInput` when the
/// prefix matches more than one task.
pub fn resolve_id(db: &Database, prefix: &str) -> Result<String, FlowError> {
    let conn = db.connection();

    let exact: Option<String> = conn
        .query_row(
            "SELECT id FROM tasks WHERE id = ?1",
            params![prefix],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| FlowError::Database(format!("Failed to resolve task id: {e}")))?;
    if let Some(id) = exact {
        return Ok(id);
    }

    let mut stmt = conn
        .prepare("SELECT id FROM tasks WHERE id LIKE ?1 || '%' LIMIT 2")
        .map_err(|e| FlowError::Database(format!("Failed to resolve task id: {e}")))?;
    let iter = stmt
        .query_map(params![prefix], |row| row.get::<_, String>(0))
        .map_err(|e| FlowError::Database(format!("Failed to resolve task id: {e}")))?;

    let mut ids = Vec::new();
    for id in iter {
        ids.push(id.map_err(|e| FlowError::Database(format!("Failed to resolve task id: {e}")))?);
    }

    match ids.len() {
        0 => Err(FlowError::NotFound(format!("task {prefix}"))),
        1 => Ok(ids.swap_remove(0)),
        _ => Err(FlowError::InvalidInput(format!(
            "ambiguous task id '{prefix}'"
        ))),
    }
}

/// List tasks, optionally filtered by status and project.
///
/// Rows come back in the canonical list order: priority descending, then
/// deadline, then newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list(
    db: &Database,
    status: Option<Status>,
    project: Option<&str>,
    limit: Option<u32>,
) -> Result<Vec<Task>, FlowError> {
    let mut sql = format!("SELECT {TASK_COLUMNS} FROM tasks");
    let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
    let mut conditions: Vec<&str> = Vec::new();

    if let Some(status) = status {
        conditions.push("status = ?");
        values.push(Box::new(status.as_int()));
    }
    if let Some(project_id) = project {
        conditions.push("project_id = ?");
        values.push(Box::new(project_id.to_string()));
    }
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    sql.push_str(" ORDER BY priority DESC, deadline ASC, created_at DESC");

    if let Some(limit) = limit {
        sql.push_str(" LIMIT ?");
        values.push(Box::new(limit));
    }

    let conn = db.connection();
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| FlowError::Database(format!("Failed to prepare task query: {e}")))?;

    let iter = stmt
        .query_map(rusqlite::params_from_iter(values.iter()), task_from_row)
        .map_err(|e| FlowError::Database(format!("Failed to query tasks: {e}")))?;

    let mut tasks = Vec::new();
    for task in iter {
        tasks.push(task.map_err(|e| FlowError::Database(format!("Failed to read task: {e}")))?);
    }
    Ok(tasks)
}

/// Change a task's title.
///
/// # Errors
///
/// Returns `NotFound` if no task has that id.
pub fn rename(db: &Database, id: &str, title: &str) -> Result<(), FlowError> {
    let affected = db
        .connection()
        .execute(
            "UPDATE tasks SET title = ?1 WHERE id = ?2",
            params![title, id],
        )
        .map_err(|e| FlowError::Database(format!("Failed to rename task: {e}")))?;
    expect_task(affected, id)
}

/// Change a task's priority.
///
/// # Errors
///
/// Returns `NotFound` if no task has that id.
pub fn set_priority(db: &Database, id: &str, priority: Priority) -> Result<(), FlowError> {
    let affected = db
        .connection()
        .execute(
            "UPDATE tasks SET priority = ?1 WHERE id = ?2",
            params![priority.as_int(), id],
        )
        .map_err(|e| FlowError::Database(format!("Failed to update priority: {e}")))?;
    expect_task(affected, id)
}

/// Replace a task's tag list.
///
/// # Errors
///
/// Returns `NotFound` if no task has that id.
pub fn set_tags(db: &Database, id: &str, tags: &[String]) -> Result<(), FlowError> {
    let tags_json = serde_json::to_string(tags)?;
    let affected = db
        .connection()
        .execute(
            "UPDATE tasks SET tags = ?1 WHERE id = ?2",
            params![tags_json, id],
        )
        .map_err(|e| FlowError::Database(format!("Failed to update tags: {e}")))?;
    expect_task(affected, id)
}

/// Change (or clear) a task's deadline.
///
/// Setting a deadline also reschedules the reminder: lead time before the
/// deadline, clamped to now so it never lands in the past. Clearing the
/// deadline clears the reminder.
///
/// # Errors
///
/// Returns `NotFound` if no task has that id.
pub fn set_deadline(
    db: &Database,
    id: &str,
    deadline: Option<i64>,
    now_ms: i64,
) -> Result<(), FlowError> {
    let lead_minutes = settings::get(db)?.reminder_lead_minutes;
    let remind_at = deadline.map(|d| reminders::remind_at_for(d, lead_minutes, now_ms));

    let affected = db
        .connection()
        .execute(
            "UPDATE tasks
             SET deadline = ?1,
                 remind_at = ?2,
                 reminded_at = NULL
             WHERE id = ?3",
            params![deadline, remind_at, id],
        )
        .map_err(|e| FlowError::Database(format!("Failed to update deadline: {e}")))?;
    expect_task(affected, id)
}

/// Change a task's status.
///
/// Completing stamps `completed_at` and clears any pending reminder; moving
/// back to todo/doing clears the completion stamp.
///
/// # Errors
///
/// Returns `NotFound` if no task has that id.
pub fn set_status(db: &Database, id: &str, status: Status, now_ms: i64) -> Result<(), FlowError> {
    let completed_at = matches!(status, Status::Done).then_some(now_ms);

    let affected = if status == Status::Done {
        db.connection()
            .execute(
                "UPDATE tasks SET status = ?1, completed_at = ?2, remind_at = NULL WHERE id = ?3",
                params![status.as_int(), completed_at, id],
            )
            .map_err(|e| FlowError::Database(format!("Failed to update status: {e}")))?
    } else {
        db.connection()
            .execute(
                "UPDATE tasks SET status = ?1, completed_at = ?2 WHERE id = ?3",
                params![status.as_int(), completed_at, id],
            )
            .map_err(|e| FlowError::Database(format!("Failed to update status: {e}")))?
    };
    expect_task(affected, id)
}

/// Delete a task.
///
/// # Errors
///
/// Returns `NotFound` if no task has that id.
pub fn delete(db: &Database, id: &str) -> Result<(), FlowError> {
    let affected = db
        .connection()
        .execute("DELETE FROM tasks WHERE id = ?1", params![id])
        .map_err(|e| FlowError::Database(format!("Failed to delete task: {e}")))?;
    expect_task(affected, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_task(id: &str, title: &str, created_at: i64) -> NewTask {
        NewTask {
            id: id.to_string(),
            project_id: None,
            title: title.to_string(),
            description: None,
            priority: Priority::Normal,
            status: Status::Todo,
            created_at,
            deadline: None,
            estimated_minutes: None,
            actual_minutes: None,
            tags: vec![],
            remind_at: None,
        }
    }

    #[test]
    fn test_add_and_get() {
        let db = Database::open_in_memory().unwrap();

        let mut task = new_task("t1", "Buy milk", 1000);
        task.tags = vec!["home".to_string()];
        let stored = add(&db, &task).unwrap();

        assert_eq!(stored.id, "t1");
        assert_eq!(stored.title, "Buy milk");
        assert_eq!(stored.tags, vec!["home"]);
        assert_eq!(stored.status, Status::Todo);
        assert!(stored.completed_at.is_none());
    }

    #[test]
    fn test_get_missing_task() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(get(&db, "nope"), Err(FlowError::NotFound(_))));
    }

    #[test]
    fn test_list_filters_by_status() {
        let db = Database::open_in_memory().unwrap();
        add(&db, &new_task("t1", "One", 1)).unwrap();
        add(&db, &new_task("t2", "Two", 2)).unwrap();
        set_status(&db, "t2", Status::Done, 5000).unwrap();

        let open = list(&db, Some(Status::Todo), None, None).unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, "t1");

        let done = list(&db, Some(Status::Done), None, None).unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].id, "t2");
    }

    #[test]
    fn test_list_orders_by_priority() {
        let db = Database::open_in_memory().unwrap();
        add(&db, &new_task("low", "Low", 1)).unwrap();
        let mut high = new_task("high", "High", 2);
        high.priority = Priority::High;
        add(&db, &high).unwrap();

        let tasks = list(&db, None, None, None).unwrap();
        assert_eq!(tasks[0].id, "high");
    }

    #[test]
    fn test_complete_stamps_and_clears_reminder() {
        let db = Database::open_in_memory().unwrap();
        let mut task = new_task("t1", "Call", 1);
        task.deadline = Some(100_000);
        task.remind_at = Some(90_000);
        add(&db, &task).unwrap();

        set_status(&db, "t1", Status::Done, 42_000).unwrap();

        let stored = get(&db, "t1").unwrap();
        assert_eq!(stored.status, Status::Done);
        assert_eq!(stored.completed_at, Some(42_000));
        assert!(stored.remind_at.is_none());
    }

    #[test]
    fn test_reopen_clears_completed_at() {
        let db = Database::open_in_memory().unwrap();
        add(&db, &new_task("t1", "Call", 1)).unwrap();
        set_status(&db, "t1", Status::Done, 42_000).unwrap();
        set_status(&db, "t1", Status::Todo, 43_000).unwrap();

        let stored = get(&db, "t1").unwrap();
        assert_eq!(stored.status, Status::Todo);
        assert!(stored.completed_at.is_none());
    }

    #[test]
    fn test_set_deadline_schedules_reminder_with_lead() {
        let db = Database::open_in_memory().unwrap();
        add(&db, &new_task("t1", "Report", 1)).unwrap();

        // Default lead is 30 minutes.
        let deadline = 10_000_000;
        set_deadline(&db, "t1", Some(deadline), 0).unwrap();

        let stored = get(&db, "t1").unwrap();
        assert_eq!(stored.deadline, Some(deadline));
        assert_eq!(stored.remind_at, Some(deadline - 30 * 60_000));
    }

    #[test]
    fn test_set_deadline_clamps_reminder_to_now() {
        let db = Database::open_in_memory().unwrap();
        add(&db, &new_task("t1", "Report", 1)).unwrap();

        let now = 5_000_000;
        // Deadline closer than the lead time: the reminder fires now.
        set_deadline(&db, "t1", Some(now + 60_000), now).unwrap();

        let stored = get(&db, "t1").unwrap();
        assert_eq!(stored.remind_at, Some(now));
    }

    #[test]
    fn test_clear_deadline_clears_reminder() {
        let db = Database::open_in_memory().unwrap();
        let mut task = new_task("t1", "Report", 1);
        task.deadline = Some(100_000);
        task.remind_at = Some(90_000);
        add(&db, &task).unwrap();

        set_deadline(&db, "t1", None, 0).unwrap();

        let stored = get(&db, "t1").unwrap();
        assert!(stored.deadline.is_none());
        assert!(stored.remind_at.is_none());
    }

    #[test]
    fn test_set_tags_replaces_list() {
        let db = Database::open_in_memory().unwrap();
        let mut task = new_task("t1", "Tagged", 1);
        task.tags = vec!["old".to_string()];
        add(&db, &task).unwrap();

        set_tags(&db, "t1", &["home".to_string(), "errands".to_string()]).unwrap();
        assert_eq!(get(&db, "t1").unwrap().tags, vec!["home", "errands"]);

        set_tags(&db, "t1", &[]).unwrap();
        assert!(get(&db, "t1").unwrap().tags.is_empty());
    }

    #[test]
    fn test_update_missing_task_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            rename(&db, "nope", "New"),
            Err(FlowError::NotFound(_))
        ));
        assert!(matches!(delete(&db, "nope"), Err(FlowError::NotFound(_))));
    }
}
