//! JSON output formatting for focusflow.

use serde::Serialize;
use serde_json::json;

use crate::error::FlowError;
use crate::storage::{Project, Task};

/// Format tasks as JSON
///
/// # Errors
///
/// Returns `FlowError::Parse` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[Task], list_name: &str) -> Result<String, FlowError> {
    let output = json!({
        "list": list_name,
        "count": tasks.len(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format projects as JSON
///
/// # Errors
///
/// Returns `FlowError::Parse` if JSON serialization fails.
pub fn format_projects_json(projects: &[Project]) -> Result<String, FlowError> {
    let output = json!({
        "count": projects.len(),
        "items": projects
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `FlowError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, FlowError> {
    Ok(serde_json::to_string_pretty(value)?)
}
