//! Full-database export and import.
//!
//! The bundle is a single JSON document carrying every table plus the
//! settings row. Import is destructive: it replaces the current contents
//! inside one transaction.

use rusqlite::params;

use crate::error::FlowError;
use crate::storage::types::Backup;
use crate::storage::Database;

use super::{finance, projects, sessions, settings, tasks};

/// Bundle format version.
pub const BACKUP_VERSION: u32 = 1;

/// Collect the full database contents into a bundle.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn export(db: &Database, now_ms: i64) -> Result<Backup, FlowError> {
    Ok(Backup {
        version: BACKUP_VERSION,
        exported_at: now_ms,
        settings: settings::get(db)?,
        projects: projects::list(db)?,
        tasks: tasks::list(db, None, None, None)?,
        focus_sessions: sessions::all(db)?,
        transactions: finance::transactions(db, None)?,
        debts: finance::debts(db)?,
    })
}

/// Replace the database contents with a bundle.
///
/// # Errors
///
/// Returns `InvalidInput` for an unsupported bundle version, or an error if
/// any write fails (the transaction rolls back).
pub fn import(db: &Database, backup: &Backup, now_ms: i64) -> Result<(), FlowError> {
    if backup.version != BACKUP_VERSION {
        return Err(FlowError::InvalidInput(format!(
            "unsupported backup version {} (expected {BACKUP_VERSION})",
            backup.version
        )));
    }

    let conn = db.connection();
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| FlowError::Database(format!("Failed to begin import: {e}")))?;

    // Tasks reference projects, so they go first on delete and last-ish on
    // insert.
    tx.execute_batch(
        "DELETE FROM tasks;
         DELETE FROM projects;
         DELETE FROM focus_sessions;
         DELETE FROM transactions;
         DELETE FROM debts;",
    )
    .map_err(|e| FlowError::Database(format!("Failed to clear tables: {e}")))?;

    for project in &backup.projects {
        tx.execute(
            "INSERT INTO projects (id, name, color, priority, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                project.id,
                project.name,
                project.color,
                project.priority.as_int(),
                project.created_at,
            ],
        )
        .map_err(|e| FlowError::Database(format!("Failed to restore project: {e}")))?;
    }

    for task in &backup.tasks {
        let tags_json = serde_json::to_string(&task.tags)?;
        tx.execute(
            "INSERT INTO tasks (id, project_id, title, description, priority, status,
                                created_at, completed_at, deadline, estimated_minutes,
                                actual_minutes, tags, remind_at, reminded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                task.id,
                task.project_id,
                task.title,
                task.description,
                task.priority.as_int(),
                task.status.as_int(),
                task.created_at,
                task.completed_at,
                task.deadline,
                task.estimated_minutes,
                task.actual_minutes,
                tags_json,
                task.remind_at,
                task.reminded_at,
            ],
        )
        .map_err(|e| FlowError::Database(format!("Failed to restore task: {e}")))?;
    }

    for session in &backup.focus_sessions {
        tx.execute(
            "INSERT INTO focus_sessions (id, task_id, duration_minutes, completed, started_at, ended_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                session.id,
                session.task_id,
                session.duration_minutes,
                session.completed,
                session.started_at,
                session.ended_at,
            ],
        )
        .map_err(|e| FlowError::Database(format!("Failed to restore session: {e}")))?;
    }

    for transaction in &backup.transactions {
        tx.execute(
            "INSERT INTO transactions (id, amount, category, date, is_expense, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                transaction.id,
                transaction.amount,
                transaction.category,
                transaction.date,
                transaction.is_expense,
                transaction.description,
                transaction.created_at,
            ],
        )
        .map_err(|e| FlowError::Database(format!("Failed to restore transaction: {e}")))?;
    }

    for debt in &backup.debts {
        tx.execute(
            "INSERT INTO debts (id, person, amount, is_owed_by_me, due_date, start_date,
                                payment_day, initial_amount, currency, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                debt.id,
                debt.person,
                debt.amount,
                debt.is_owed_by_me,
                debt.due_date,
                debt.start_date,
                debt.payment_day,
                debt.initial_amount,
                debt.currency,
                debt.created_at,
            ],
        )
        .map_err(|e| FlowError::Database(format!("Failed to restore debt: {e}")))?;
    }

    tx.commit()
        .map_err(|e| FlowError::Database(format!("Failed to commit import: {e}")))?;

    settings::save(db, &backup.settings, now_ms)
}
