//! Stored entity types.
//!
//! All timestamps are milliseconds since the Unix epoch, matching what the
//! intake parser produces. Enums are stored as small integers and exposed
//! as lowercase strings in JSON output.

use serde::{Deserialize, Serialize};

use crate::core::{Focusable, Priority};

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not started.
    #[default]
    Todo,
    /// In progress.
    Doing,
    /// Completed.
    Done,
}

impl Status {
    /// Integer representation used by the database.
    #[must_use]
    pub const fn as_int(self) -> i32 {
        match self {
            Self::Todo => 0,
            Self::Doing => 1,
            Self::Done => 2,
        }
    }

    /// Convert from the database representation. Unknown values fall back
    /// to `Todo`.
    #[must_use]
    pub const fn from_int(value: i32) -> Self {
        match value {
            1 => Self::Doing,
            2 => Self::Done,
            _ => Self::Todo,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        })
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" | "t" => Ok(Self::Todo),
            "doing" | "d" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            other => Err(format!(
                "unknown status '{other}' (expected todo, doing, or done)"
            )),
        }
    }
}

/// A stored task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: Priority,
    pub status: Status,
    pub created_at: i64,
    #[serde(default)]
    pub completed_at: Option<i64>,
    #[serde(default)]
    pub deadline: Option<i64>,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    #[serde(default)]
    pub actual_minutes: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub remind_at: Option<i64>,
    #[serde(default)]
    pub reminded_at: Option<i64>,
}

impl Focusable for Task {
    fn priority(&self) -> Priority {
        self.priority
    }

    fn deadline(&self) -> Option<i64> {
        self.deadline
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }
}

/// Insert shape for a new task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: Priority,
    pub status: Status,
    pub created_at: i64,
    #[serde(default)]
    pub deadline: Option<i64>,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    #[serde(default)]
    pub actual_minutes: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub remind_at: Option<i64>,
}

/// A project grouping tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub color: String,
    pub priority: Priority,
    pub created_at: i64,
}

/// A timed focus session tied to a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusSession {
    pub id: String,
    pub task_id: String,
    pub duration_minutes: i64,
    pub completed: bool,
    pub started_at: i64,
    #[serde(default)]
    pub ended_at: Option<i64>,
}

/// Application settings, stored as a single database row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub pomodoro_length: u32,
    pub short_break_length: u32,
    pub long_break_length: u32,
    pub pomodoros_until_long_break: u32,
    pub sound_enabled: bool,
    pub auto_start_breaks: bool,
    pub auto_start_pomodoros: bool,
    pub reminder_lead_minutes: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            pomodoro_length: 25,
            short_break_length: 5,
            long_break_length: 15,
            pomodoros_until_long_break: 4,
            sound_enabled: true,
            auto_start_breaks: false,
            auto_start_pomodoros: false,
            reminder_lead_minutes: 30,
        }
    }
}

/// A single income or expense record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub category: String,
    pub date: i64,
    pub is_expense: bool,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: i64,
}

/// Money owed to or by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    pub id: String,
    pub person: String,
    pub amount: f64,
    pub is_owed_by_me: bool,
    #[serde(default)]
    pub due_date: Option<i64>,
    #[serde(default)]
    pub start_date: Option<i64>,
    #[serde(default)]
    pub payment_day: Option<u32>,
    #[serde(default)]
    pub initial_amount: Option<f64>,
    pub currency: String,
    pub created_at: i64,
}

/// Everything the finance view needs in one fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinanceSummary {
    pub transactions: Vec<Transaction>,
    pub debts: Vec<Debt>,
}

/// Aggregated productivity statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserStats {
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub completed_today: i64,
    pub completed_week: i64,
    pub best_streak: u32,
    pub total_focus_time: i64,
    pub tasks_today: i64,
    pub tasks_week: i64,
    pub current_streak: u32,
    pub level: u32,
    pub points: i64,
}

/// One day of the completion heatmap series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionDay {
    /// Local calendar day, `YYYY-MM-DD`.
    pub day: String,
    pub count: i64,
}

/// A full data bundle for export/import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backup {
    pub version: u32,
    pub exported_at: i64,
    pub settings: AppSettings,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub focus_sessions: Vec<FocusSession>,
    pub transactions: Vec<Transaction>,
    pub debts: Vec<Debt>,
}
