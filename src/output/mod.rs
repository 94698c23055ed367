//! Output formatting for focusflow.
//!
//! This module provides formatters for displaying stored data in either
//! human-readable (colored) or JSON form.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::FlowError;
use crate::storage::{AppSettings, CompletionDay, FinanceSummary, Project, Task, UserStats};

pub use json::*;
pub use pretty::*;

/// Format a task list based on output format.
///
/// # Errors
///
/// Returns `FlowError::Parse` if JSON serialization fails.
pub fn format_tasks(tasks: &[Task], title: &str, format: OutputFormat) -> Result<String, FlowError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, title)),
        OutputFormat::Json => format_tasks_json(tasks, title),
    }
}

/// Format a single task based on output format.
///
/// # Errors
///
/// Returns `FlowError::Parse` if JSON serialization fails.
pub fn format_task(task: &Task, format: OutputFormat) -> Result<String, FlowError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task)),
        OutputFormat::Json => to_json(task),
    }
}

/// Format projects based on output format.
///
/// # Errors
///
/// Returns `FlowError::Parse` if JSON serialization fails.
pub fn format_projects(projects: &[Project], format: OutputFormat) -> Result<String, FlowError> {
    match format {
        OutputFormat::Pretty => Ok(format_projects_pretty(projects)),
        OutputFormat::Json => format_projects_json(projects),
    }
}

/// Format a stats snapshot based on output format.
///
/// # Errors
///
/// Returns `FlowError::Parse` if JSON serialization fails.
pub fn format_stats(stats: &UserStats, format: OutputFormat) -> Result<String, FlowError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(stats)),
        OutputFormat::Json => to_json(stats),
    }
}

/// Format the completion series based on output format.
///
/// # Errors
///
/// Returns `FlowError::Parse` if JSON serialization fails.
pub fn format_series(series: &[CompletionDay], format: OutputFormat) -> Result<String, FlowError> {
    match format {
        OutputFormat::Pretty => Ok(format_series_pretty(series)),
        OutputFormat::Json => to_json(series),
    }
}

/// Format the finance summary based on output format.
///
/// # Errors
///
/// Returns `FlowError::Parse` if JSON serialization fails.
pub fn format_finance(summary: &FinanceSummary, format: OutputFormat) -> Result<String, FlowError> {
    match format {
        OutputFormat::Pretty => Ok(format_finance_pretty(summary)),
        OutputFormat::Json => to_json(summary),
    }
}

/// Format app settings based on output format.
///
/// # Errors
///
/// Returns `FlowError::Parse` if JSON serialization fails.
pub fn format_settings(settings: &AppSettings, format: OutputFormat) -> Result<String, FlowError> {
    match format {
        OutputFormat::Pretty => Ok(format_settings_pretty(settings)),
        OutputFormat::Json => to_json(settings),
    }
}
