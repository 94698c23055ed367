//! Project storage operations.

use rusqlite::{params, OptionalExtension, Row};

use crate::core::Priority;
use crate::error::FlowError;
use crate::storage::types::Project;
use crate::storage::Database;

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        color: row.get(2)?,
        priority: Priority::from_int(row.get(3)?),
        created_at: row.get(4)?,
    })
}

fn expect_project(affected: usize, id: &str) -> Result<(), FlowError> {
    if affected == 0 {
        Err(FlowError::NotFound(format!("project {id}")))
    } else {
        Ok(())
    }
}

/// Insert a new project.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn add(db: &Database, project: &Project) -> Result<(), FlowError> {
    db.connection()
        .execute(
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
        .map_err(|e| FlowError::Database(format!("Failed to insert project: {e}")))?;
    Ok(())
}

/// Load a project by id.
///
/// # Errors
///
/// Returns `NotFound` if no project has that id.
pub fn get(db: &Database, id: &str) -> Result<Project, FlowError> {
    db.connection()
        .query_row(
            "SELECT id, name, color, priority, created_at FROM projects WHERE id = ?1",
            params![id],
            project_from_row,
        )
        .optional()
        .map_err(|e| FlowError::Database(format!("Failed to load project: {e}")))?
        .ok_or_else(|| FlowError::NotFound(format!("project {id}")))
}

/// Resolve a project id from a full id, a unique prefix, or an exact name.
///
/// # Errors
///
/// Returns `NotFound` when nothing matches and `InvalidInput` when the
/// prefix matches more than one project.
pub fn resolve_id(db: &Database, prefix: &str) -> Result<String, FlowError> {
    let conn = db.connection();

    let exact: Option<String> = conn
        .query_row(
            "SELECT id FROM projects WHERE id = ?1 OR name = ?1",
            params![prefix],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| FlowError::Database(format!("Failed to resolve project id: {e}")))?;
    if let Some(id) = exact {
        return Ok(id);
    }

    let mut stmt = conn
        .prepare("SELECT id FROM projects WHERE id LIKE ?1 || '%' LIMIT 2")
        .map_err(|e| FlowError::Database(format!("Failed to resolve project id: {e}")))?;
    let iter = stmt
        .query_map(params![prefix], |row| row.get::<_, String>(0))
        .map_err(|e| FlowError::Database(format!("Failed to resolve project id: {e}")))?;

    let mut ids = Vec::new();
    for id in iter {
        ids.push(
            id.map_err(|e| FlowError::Database(format!("Failed to resolve project id: {e}")))?,
        );
    }

    match ids.len() {
        0 => Err(FlowError::NotFound(format!("project {prefix}"))),
        1 => Ok(ids.swap_remove(0)),
        _ => Err(FlowError::InvalidInput(format!(
            "ambiguous project id '{prefix}'"
        ))),
    }
}

/// List all projects, highest priority first, newest first within a tier.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list(db: &Database) -> Result<Vec<Project>, FlowError> {
    let conn = db.connection();
    let mut stmt = conn
        .prepare(
            "SELECT id, name, color, priority, created_at
             FROM projects
             ORDER BY priority DESC, created_at DESC",
        )
        .map_err(|e| FlowError::Database(format!("Failed to prepare project query: {e}")))?;

    let iter = stmt
        .query_map([], project_from_row)
        .map_err(|e| FlowError::Database(format!("Failed to query projects: {e}")))?;

    let mut projects = Vec::new();
    for project in iter {
        projects
            .push(project.map_err(|e| FlowError::Database(format!("Failed to read project: {e}")))?);
    }
    Ok(projects)
}

/// Change a project's name.
///
/// # Errors
///
/// Returns `NotFound` if no project has that id.
pub fn rename(db: &Database, id: &str, name: &str) -> Result<(), FlowError> {
    let affected = db
        .connection()
        .execute(
            "UPDATE projects SET name = ?1 WHERE id = ?2",
            params![name, id],
        )
        .map_err(|e| FlowError::Database(format!("Failed to rename project: {e}")))?;
    expect_project(affected, id)
}

/// Change a project's priority.
///
/// # Errors
///
/// Returns `NotFound` if no project has that id.
pub fn set_priority(db: &Database, id: &str, priority: Priority) -> Result<(), FlowError> {
    let affected = db
        .connection()
        .execute(
            "UPDATE projects SET priority = ?1 WHERE id = ?2",
            params![priority.as_int(), id],
        )
        .map_err(|e| FlowError::Database(format!("Failed to update project priority: {e}")))?;
    expect_project(affected, id)
}

/// Delete a project. Tasks in it stay, with their project link cleared.
///
/// # Errors
///
/// Returns `NotFound` if no project has that id.
pub fn delete(db: &Database, id: &str) -> Result<(), FlowError> {
    let affected = db
        .connection()
        .execute("DELETE FROM projects WHERE id = ?1", params![id])
        .map_err(|e| FlowError::Database(format!("Failed to delete project: {e}")))?;
    expect_project(affected, id)
}
