//! Quick add command implementation.
//!
//! This module implements the `focusflow add` command for natural language
//! task entry.

use std::fmt::Write;

use chrono::Utc;
use colored::Colorize;
use serde_json::json;
use uuid::Uuid;

use crate::cli::args::{AddArgs, OutputFormat};
use crate::core::{parse_intent, ParsedIntent};
use crate::error::FlowError;
use crate::output::format_timestamp;
use crate::storage::{projects, reminders, settings, tasks, Database, NewTask, Status};

/// Execute the quick add command.
///
/// # Errors
///
/// Returns an error if nothing usable is left as a title, the project
/// cannot be resolved, or the insert fails.
pub fn quick_add(db: &Database, args: AddArgs, format: OutputFormat) -> Result<String, FlowError> {
    let intent = parse_intent(&args.text);

    // Parse-only mode shows the extraction without touching the database.
    if args.parse_only {
        return format_parsed_intent(&intent, format);
    }

    if intent.clean_title.is_empty() {
        return Err(FlowError::InvalidInput(
            "no task title left after parsing".to_string(),
        ));
    }

    let project_id = args
        .project
        .map(|p| projects::resolve_id(db, &p))
        .transpose()?;

    let now_ms = Utc::now().timestamp_millis();
    let lead_minutes = settings::get(db)?.reminder_lead_minutes;
    let remind_at = intent
        .deadline
        .map(|d| reminders::remind_at_for(d, lead_minutes, now_ms));

    let new_task = NewTask {
        id: Uuid::new_v4().to_string(),
        project_id,
        title: intent.clean_title.clone(),
        description: args.notes,
        priority: intent.priority.unwrap_or_default(),
        status: Status::Todo,
        created_at: now_ms,
        deadline: intent.deadline,
        estimated_minutes: args.estimate,
        actual_minutes: None,
        tags: intent.tags.clone().unwrap_or_default(),
        remind_at,
    };

    let task = tasks::add(db, &new_task)?;

    match format {
        OutputFormat::Json => {
            let output = json!({
                "created": true,
                "task": task,
            });
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Pretty => {
            let mut output = format!(
                "{} {} (ID: {})\n",
                "Created:".green().bold(),
                task.title,
                task.id.dimmed()
            );

            if let Some(deadline) = task.deadline {
                writeln!(output, "  {} {}", "Deadline:".red(), format_timestamp(deadline)).ok();
            }
            if let Some(remind_at) = task.remind_at {
                writeln!(output, "  {} {}", "Reminder:".cyan(), format_timestamp(remind_at)).ok();
            }
            if !task.tags.is_empty() {
                let tags_str: Vec<String> = task.tags.iter().map(|t| format!("#{t}")).collect();
                writeln!(output, "  {} {}", "Tags:".yellow(), tags_str.join(" ")).ok();
            }
            if let Some(project) = &task.project_id {
                writeln!(output, "  {} {project}", "Project:".magenta()).ok();
            }
            writeln!(output, "  {} {}", "Priority:".red().bold(), task.priority).ok();

            Ok(output)
        }
    }
}

/// Format a parsed intent for display (parse-only mode).
fn format_parsed_intent(intent: &ParsedIntent, format: OutputFormat) -> Result<String, FlowError> {
    match format {
        OutputFormat::Json => {
            let output = json!({
                "parsed": true,
                "title": intent.clean_title,
                "deadline": intent.deadline,
                "priority": intent.priority.map(|p| p.to_string()),
                "tags": intent.tags,
            });
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Pretty => {
            let mut output = format!("{}\n", "Parsed task (not created)".yellow().bold());
            writeln!(output, "  {} {}", "Title:".cyan().bold(), intent.clean_title).ok();

            if let Some(deadline) = intent.deadline {
                writeln!(output, "  {} {}", "Deadline:".red(), format_timestamp(deadline)).ok();
            }
            if let Some(priority) = intent.priority {
                writeln!(output, "  {} {priority}", "Priority:".red().bold()).ok();
            }
            if let Some(tags) = &intent.tags {
                let tags_str: Vec<String> = tags.iter().map(|t| format!("#{t}")).collect();
                writeln!(output, "  {} {}", "Tags:".yellow(), tags_str.join(" ")).ok();
            }

            Ok(output)
        }
    }
}
