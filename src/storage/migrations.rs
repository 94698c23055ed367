//! Database migrations for focusflow.
//!
//! Each migration upgrades the schema by one version. Migrations run
//! automatically when the database is opened; the version is tracked in
//! `PRAGMA user_version`.

use rusqlite::Connection;

use crate::error::FlowError;

/// Current schema version.
const CURRENT_VERSION: i32 = 3;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, FlowError> {
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| FlowError::Database(format!("Failed to get schema version: {e}")))?;

    Ok(version)
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), FlowError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| FlowError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), FlowError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), FlowError> {
    match version {
        1 => migrate_v1(conn),
        2 => migrate_v2(conn),
        3 => migrate_v3(conn),
        _ => Err(FlowError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: base schema.
///
/// Creates tables for:
/// - `projects`: task groupings
/// - `tasks`: the task list itself (tags as a JSON array column)
/// - `focus_sessions`: timed focus session history
/// - `settings`: one-row application settings
fn migrate_v1(conn: &Connection) -> Result<(), FlowError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS projects (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            color TEXT NOT NULL DEFAULT '#6c5ce7',
            priority INTEGER NOT NULL DEFAULT 1,
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY,
            project_id TEXT REFERENCES projects(id) ON DELETE SET NULL,
            title TEXT NOT NULL,
            description TEXT,
            priority INTEGER NOT NULL DEFAULT 1,
            status INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            completed_at INTEGER,
            deadline INTEGER,
            estimated_minutes INTEGER,
            actual_minutes INTEGER,
            tags TEXT NOT NULL DEFAULT '[]'
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
        CREATE INDEX IF NOT EXISTS idx_tasks_project ON tasks(project_id);
        CREATE INDEX IF NOT EXISTS idx_tasks_deadline ON tasks(deadline);

        CREATE TABLE IF NOT EXISTS focus_sessions (
            id TEXT PRIMARY KEY,
            task_id TEXT NOT NULL,
            duration_minutes INTEGER NOT NULL DEFAULT 0,
            completed INTEGER NOT NULL DEFAULT 0,
            started_at INTEGER NOT NULL,
            ended_at INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_focus_sessions_task
        ON focus_sessions(task_id);

        CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            pomodoro_length INTEGER NOT NULL DEFAULT 25,
            short_break_length INTEGER NOT NULL DEFAULT 5,
            long_break_length INTEGER NOT NULL DEFAULT 15,
            pomodoros_until_long_break INTEGER NOT NULL DEFAULT 4,
            sound_enabled INTEGER NOT NULL DEFAULT 1,
            auto_start_breaks INTEGER NOT NULL DEFAULT 0,
            auto_start_pomodoros INTEGER NOT NULL DEFAULT 0,
            updated_at INTEGER NOT NULL DEFAULT 0
        );
        ",
    )
    .map_err(|e| FlowError::Database(format!("Migration v1 failed: {e}")))
}

/// Migration v2: deadline reminders.
fn migrate_v2(conn: &Connection) -> Result<(), FlowError> {
    conn.execute_batch(
        r"
        ALTER TABLE tasks ADD COLUMN remind_at INTEGER;
        ALTER TABLE tasks ADD COLUMN reminded_at INTEGER;
        ALTER TABLE settings ADD COLUMN reminder_lead_minutes INTEGER NOT NULL DEFAULT 30;

        CREATE INDEX IF NOT EXISTS idx_tasks_remind_at ON tasks(remind_at);
        ",
    )
    .map_err(|e| FlowError::Database(format!("Migration v2 failed: {e}")))
}

/// Migration v3: personal finance (transactions and debts).
fn migrate_v3(conn: &Connection) -> Result<(), FlowError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS transactions (
            id TEXT PRIMARY KEY,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            date INTEGER NOT NULL,
            is_expense INTEGER NOT NULL,
            description TEXT,
            created_at INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

        CREATE TABLE IF NOT EXISTS debts (
            id TEXT PRIMARY KEY,
            person TEXT NOT NULL,
            amount REAL NOT NULL,
            is_owed_by_me INTEGER NOT NULL,
            due_date INTEGER,
            start_date INTEGER,
            payment_day INTEGER,
            initial_amount REAL,
            currency TEXT NOT NULL DEFAULT 'RUB',
            created_at INTEGER NOT NULL
        );
        ",
    )
    .map_err(|e| FlowError::Database(format!("Migration v3 failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_reach_current_version() {
        let conn = Connection::open_in_memory().unwrap();

        run(&conn).unwrap();
        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);

        // Verify tables exist by inserting data.
        conn.execute(
            "INSERT INTO projects (id, name, color, priority, created_at)
             VALUES ('p1', 'Home', '#ff0000', 1, 0)",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO tasks (id, project_id, title, priority, status, created_at, tags)
             VALUES ('t1', 'p1', 'Test', 2, 0, 0, '[]')",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO transactions (id, amount, category, date, is_expense, created_at)
             VALUES ('x1', 9.5, 'food', 0, 1, 0)",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_migrations_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        run(&conn).unwrap();
        run(&conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_get_version_new_database() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_version(&conn).unwrap(), 0);
    }

    #[test]
    fn test_reminder_columns_exist() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();

        conn.execute(
            "UPDATE tasks SET remind_at = 123, reminded_at = NULL WHERE id = 'none'",
            [],
        )
        .unwrap();
    }
}
