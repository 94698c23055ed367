//! Local persistence for focusflow.
//!
//! One `SQLite` database holds everything: projects, tasks, focus sessions,
//! settings, and finance records. `Database` owns the connection; the
//! entity modules expose free functions over it.

pub mod backup;
mod database;
pub mod finance;
mod migrations;
pub mod projects;
pub mod reminders;
pub mod sessions;
pub mod settings;
pub mod stats;
pub mod tasks;
mod types;

pub use database::Database;
pub use types::{
    AppSettings, Backup, CompletionDay, Debt, FinanceSummary, FocusSession, NewTask, Project,
    Status, Task, Transaction, UserStats,
};
