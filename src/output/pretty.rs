use chrono::{Local, TimeZone};
use colored::Colorize;

use crate::core::Priority;
use crate::storage::{AppSettings, CompletionDay, FinanceSummary, Project, Status, Task, UserStats};

/// Render a ms-epoch timestamp as local `YYYY-MM-DD HH:MM`.
#[must_use]
pub fn format_timestamp(ms: i64) -> String {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map_or_else(|| ms.to_string(), |dt| dt.format("%Y-%m-%d %H:%M").to_string())
}

fn status_icon(status: Status) -> colored::ColoredString {
    match status {
        Status::Todo => "[ ]".white(),
        Status::Doing => "[~]".yellow(),
        Status::Done => "[x]".green(),
    }
}

fn priority_marker(priority: Priority) -> Option<colored::ColoredString> {
    match priority {
        Priority::High => Some("!high".red()),
        Priority::Low => Some("low".dimmed()),
        Priority::Normal => None,
    }
}

/// Format a list of tasks as a pretty table
#[must_use]
pub fn format_tasks_pretty(tasks: &[Task], title: &str) -> String {
    if tasks.is_empty() {
        return format!("{} (0 items)\n  No items", title);
    }

    let mut output = format!("{} ({} items)\n", title, tasks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for task in tasks {
        let name = match task.status {
            Status::Done => task.title.strikethrough().to_string(),
            _ => task.title.clone(),
        };

        let mut line = format!("{} {}  {}", status_icon(task.status), short_id(&task.id), name.bold());

        if let Some(marker) = priority_marker(task.priority) {
            line.push_str(&format!("  {}", marker));
        }

        if let Some(deadline) = task.deadline {
            line.push_str(&format!("  {}", format_timestamp(deadline).yellow()));
        }

        if !task.tags.is_empty() {
            let tags_str = task
                .tags
                .iter()
                .map(|t| format!("#{}", t))
                .collect::<Vec<_>>()
                .join(" ");
            line.push_str(&format!("  {}", tags_str.cyan()));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// First id segment, enough to address a task from the shell.
#[must_use]
pub fn short_id(id: &str) -> String {
    id.split('-').next().unwrap_or(id).to_string()
}

/// Format a single task as pretty output
#[must_use]
pub fn format_task_pretty(task: &Task) -> String {
    let mut output = format!("{} {}\n", status_icon(task.status), task.title.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), task.id));
    output.push_str(&format!("  {}: {}\n", "Status".dimmed(), task.status));
    output.push_str(&format!("  {}: {}\n", "Priority".dimmed(), task.priority));

    if let Some(description) = &task.description {
        output.push_str(&format!("  {}: {}\n", "Notes".dimmed(), description));
    }

    if let Some(project_id) = &task.project_id {
        output.push_str(&format!("  {}: {}\n", "Project".dimmed(), project_id));
    }

    if let Some(deadline) = task.deadline {
        output.push_str(&format!(
            "  {}: {}\n",
            "Deadline".dimmed(),
            format_timestamp(deadline)
        ));
    }

    if let Some(remind_at) = task.remind_at {
        output.push_str(&format!(
            "  {}: {}\n",
            "Reminder".dimmed(),
            format_timestamp(remind_at)
        ));
    }

    if !task.tags.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Tags".dimmed(), task.tags.join(", ")));
    }

    if let Some(estimated) = task.estimated_minutes {
        output.push_str(&format!("  {}: {} min\n", "Estimated".dimmed(), estimated));
    }

    output.push_str(&format!(
        "  {}: {}\n",
        "Created".dimmed(),
        format_timestamp(task.created_at)
    ));

    if let Some(completed_at) = task.completed_at {
        output.push_str(&format!(
            "  {}: {}\n",
            "Completed".dimmed(),
            format_timestamp(completed_at)
        ));
    }

    output
}

/// Format a list of projects as pretty output
#[must_use]
pub fn format_projects_pretty(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "Projects (0)\n  No projects".to_string();
    }

    let mut output = format!("Projects ({})\n", projects.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for project in projects {
        let mut line = format!("▸ {}  {}", short_id(&project.id), project.name.bold());

        if let Some(marker) = priority_marker(project.priority) {
            line.push_str(&format!("  {}", marker));
        }

        line.push_str(&format!("  {}", project.color.dimmed()));

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format the stats snapshot as pretty output
#[must_use]
pub fn format_stats_pretty(stats: &UserStats) -> String {
    let mut output = format!("{}\n", "Statistics".bold());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    output.push_str(&format!(
        "  {}: {} total, {} completed\n",
        "Tasks".cyan(),
        stats.total_tasks,
        stats.completed_tasks
    ));
    output.push_str(&format!(
        "  {}: {} today, {} this week\n",
        "Created".cyan(),
        stats.tasks_today,
        stats.tasks_week
    ));
    output.push_str(&format!(
        "  {}: {} today, {} this week\n",
        "Completed".cyan(),
        stats.completed_today,
        stats.completed_week
    ));
    output.push_str(&format!(
        "  {}: {} current, {} best\n",
        "Streak".cyan(),
        stats.current_streak,
        stats.best_streak
    ));
    output.push_str(&format!(
        "  {}: {} min\n",
        "Focus time".cyan(),
        stats.total_focus_time
    ));
    output.push_str(&format!(
        "  {}: level {}, {} points\n",
        "Progress".cyan(),
        stats.level,
        stats.points
    ));

    output
}

/// Format the completion series as a simple bar-per-day listing
#[must_use]
pub fn format_series_pretty(series: &[CompletionDay]) -> String {
    if series.is_empty() {
        return "No completions in range".to_string();
    }

    let mut output = String::new();
    for day in series {
        let bar = "█".repeat(usize::try_from(day.count).unwrap_or(0).min(40));
        output.push_str(&format!("{}  {:>3}  {}\n", day.day, day.count, bar.green()));
    }
    output
}

/// Format the finance summary as pretty output
#[must_use]
pub fn format_finance_pretty(summary: &FinanceSummary) -> String {
    let income: f64 = summary
        .transactions
        .iter()
        .filter(|t| !t.is_expense)
        .map(|t| t.amount)
        .sum();
    let expenses: f64 = summary
        .transactions
        .iter()
        .filter(|t| t.is_expense)
        .map(|t| t.amount)
        .sum();

    let mut output = format!("{}\n", "Finance".bold());
    output.push_str(&"─".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  {}: {:.2}   {}: {:.2}   {}: {:.2}\n",
        "Income".green(),
        income,
        "Expenses".red(),
        expenses,
        "Balance".cyan(),
        income - expenses
    ));

    if !summary.transactions.is_empty() {
        output.push_str(&format!("\n{}\n", "Transactions".bold()));
        for tx in &summary.transactions {
            let sign = if tx.is_expense { "-" } else { "+" };
            let amount = format!("{sign}{:.2}", tx.amount);
            let amount = if tx.is_expense {
                amount.red()
            } else {
                amount.green()
            };
            let mut line = format!(
                "  {}  {}  {:>10}  {}",
                short_id(&tx.id),
                format_timestamp(tx.date).dimmed(),
                amount,
                tx.category
            );
            if let Some(description) = &tx.description {
                line.push_str(&format!("  {}", description.dimmed()));
            }
            output.push_str(&line);
            output.push('\n');
        }
    }

    if !summary.debts.is_empty() {
        output.push_str(&format!("\n{}\n", "Debts".bold()));
        for debt in &summary.debts {
            let direction = if debt.is_owed_by_me {
                "I owe".red()
            } else {
                "owes me".green()
            };
            let mut line = format!(
                "  {}  {} {} {:.2} {}",
                short_id(&debt.id),
                debt.person.bold(),
                direction,
                debt.amount,
                debt.currency
            );
            if let Some(due) = debt.due_date {
                line.push_str(&format!("  due {}", format_timestamp(due).yellow()));
            }
            output.push_str(&line);
            output.push('\n');
        }
    }

    output
}

/// Format app settings as pretty output
#[must_use]
pub fn format_settings_pretty(settings: &AppSettings) -> String {
    let mut output = format!("{}\n", "Settings".bold());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    output.push_str(&format!(
        "  pomodoro_length: {} min\n",
        settings.pomodoro_length
    ));
    output.push_str(&format!(
        "  short_break_length: {} min\n",
        settings.short_break_length
    ));
    output.push_str(&format!(
        "  long_break_length: {} min\n",
        settings.long_break_length
    ));
    output.push_str(&format!(
        "  pomodoros_until_long_break: {}\n",
        settings.pomodoros_until_long_break
    ));
    output.push_str(&format!("  sound_enabled: {}\n", settings.sound_enabled));
    output.push_str(&format!(
        "  auto_start_breaks: {}\n",
        settings.auto_start_breaks
    ));
    output.push_str(&format!(
        "  auto_start_pomodoros: {}\n",
        settings.auto_start_pomodoros
    ));
    output.push_str(&format!(
        "  reminder_lead_minutes: {} min\n",
        settings.reminder_lead_minutes
    ));

    output
}
