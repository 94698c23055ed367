//! Focus session storage.

use rusqlite::{params, Row};
use uuid::Uuid;

use crate::error::FlowError;
use crate::storage::types::FocusSession;
use crate::storage::Database;

use super::tasks;

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<FocusSession> {
    Ok(FocusSession {
        id: row.get(0)?,
        task_id: row.get(1)?,
        duration_minutes: row.get(2)?,
        completed: row.get(3)?,
        started_at: row.get(4)?,
        ended_at: row.get(5)?,
    })
}

/// Start a focus session against a task.
///
/// # Errors
///
/// Returns `NotFound` if the task does not exist, or an error if the insert
/// fails.
pub fn start(db: &Database, task_id: &str, now_ms: i64) -> Result<FocusSession, FlowError> {
    // Fail early with a task-shaped error instead of a dangling session.
    let _ = tasks::get(db, task_id)?;

    let session = FocusSession {
        id: Uuid::new_v4().to_string(),
        task_id: task_id.to_string(),
        duration_minutes: 0,
        completed: false,
        started_at: now_ms,
        ended_at: None,
    };

    db.connection()
        .execute(
            "INSERT INTO focus_sessions (id, task_id, duration_minutes, completed, started_at, ended_at)
             VALUES (?1, ?2, 0, 0, ?3, NULL)",
            params![session.id, session.task_id, session.started_at],
        )
        .map_err(|e| FlowError::Database(format!("Failed to start session: {e}")))?;

    Ok(session)
}

/// Finish a session: record the worked minutes, whether it completed, and
/// the end time.
///
/// # Errors
///
/// Returns `NotFound` if no session has that id.
pub fn finish(
    db: &Database,
    session_id: &str,
    duration_minutes: i64,
    completed: bool,
    now_ms: i64,
) -> Result<(), FlowError> {
    let affected = db
        .connection()
        .execute(
            "UPDATE focus_sessions
             SET duration_minutes = ?1, completed = ?2, ended_at = ?3
             WHERE id = ?4",
            params![duration_minutes, completed, now_ms, session_id],
        )
        .map_err(|e| FlowError::Database(format!("Failed to finish session: {e}")))?;

    if affected == 0 {
        Err(FlowError::NotFound(format!("session {session_id}")))
    } else {
        Ok(())
    }
}

/// List every recorded session, newest first. Used by backup export.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn all(db: &Database) -> Result<Vec<FocusSession>, FlowError> {
    let conn = db.connection();
    let mut stmt = conn
        .prepare(
            "SELECT id, task_id, duration_minutes, completed, started_at, ended_at
             FROM focus_sessions
             ORDER BY started_at DESC",
        )
        .map_err(|e| FlowError::Database(format!("Failed to prepare session query: {e}")))?;

    let iter = stmt
        .query_map([], session_from_row)
        .map_err(|e| FlowError::Database(format!("Failed to query sessions: {e}")))?;

    let mut sessions = Vec::new();
    for session in iter {
        sessions
            .push(session.map_err(|e| FlowError::Database(format!("Failed to read session: {e}")))?);
    }
    Ok(sessions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Priority;
    use crate::storage::types::{NewTask, Status};

    fn seed_task(db: &Database, id: &str) {
        let task = NewTask {
            id: id.to_string(),
            project_id: None,
            title: "Focus target".to_string(),
            description: None,
            priority: Priority::Normal,
            status: Status::Todo,
            created_at: 1,
            deadline: None,
            estimated_minutes: None,
            actual_minutes: None,
            tags: vec![],
            remind_at: None,
        };
        tasks::add(db, &task).unwrap();
    }

    #[test]
    fn test_start_and_finish() {
        let db = Database::open_in_memory().unwrap();
        seed_task(&db, "t1");

        let session = start(&db, "t1", 1000).unwrap();
        assert_eq!(session.task_id, "t1");
        assert!(!session.completed);

        finish(&db, &session.id, 25, true, 2000).unwrap();

        let sessions = all(&db).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].duration_minutes, 25);
        assert!(sessions[0].completed);
        assert_eq!(sessions[0].ended_at, Some(2000));
    }

    #[test]
    fn test_cancel_keeps_partial_minutes() {
        let db = Database::open_in_memory().unwrap();
        seed_task(&db, "t1");

        let session = start(&db, "t1", 1000).unwrap();
        finish(&db, &session.id, 10, false, 2000).unwrap();

        let sessions = all(&db).unwrap();
        assert_eq!(sessions[0].duration_minutes, 10);
        assert!(!sessions[0].completed);
    }

    #[test]
    fn test_start_requires_existing_task() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            start(&db, "ghost", 1000),
            Err(FlowError::NotFound(_))
        ));
    }

    #[test]
    fn test_finish_unknown_session() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            finish(&db, "ghost", 5, true, 2000),
            Err(FlowError::NotFound(_))
        ));
    }
}
