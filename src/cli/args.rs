use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::core::Priority;
use crate::storage::Status;

#[derive(Parser)]
#[command(name = "focusflow")]
#[command(about = "A local-first personal productivity CLI with natural-language quick add")]
#[command(long_about = "focusflow - tasks, projects, focus sessions, and finances in one place

Everything lives in a local SQLite database under ~/.focusflow/. The fastest
way in is the natural-language quick add, which understands mixed
Russian/English input:

QUICK START:
  focusflow add \"позвонить маме завтра 15:00 #семья важно\"
  focusflow task list              Show tasks
  focusflow focus next             What should I work on right now?
  focusflow stats                  Completion counts and streaks

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  focusflow <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    /// When omitted, the default from ~/.focusflow/config.yaml applies.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Quick add a task with natural language
    ///
    /// Parses free-form input (mixed Russian/English) into a task with a
    /// deadline, priority, and tags. This is the fastest way to capture.
    ///
    /// # Examples
    ///
    ///   focusflow add "купить молоко завтра 15:00 #дом"
    ///   focusflow add "сдать отчёт через 2 дн важно #работа"
    ///   focusflow add "review PR в пятницу !" --project work
    ///   focusflow add "звонок 15:30" --parse-only
    ///
    /// # Supported Patterns
    ///
    ///   Dates:      сегодня, завтра, вечером, утром, в пятницу, через 2 дн
    ///   Times:      15:30, 15 30 (rolls to tomorrow if already past)
    ///   Tags:       #tag1 #дом
    ///   Priority:   важно, срочно, высокий приоритет, !, низкий приоритет
    ///
    /// Unrecognized text stays in the title; nothing is ever rejected.
    #[command(alias = "a")]
    Add(AddArgs),

    /// Manage tasks (list, show, start, done, reopen, rename, tag, delete)
    ///
    /// Commands for working with individual tasks. Task ids can be
    /// shortened to any unique prefix.
    ///
    /// # Examples
    ///
    ///   focusflow task list --status todo
    ///   focusflow task show 3f2a
    ///   focusflow task done 3f2a
    ///   focusflow task deadline 3f2a завтра 18:00
    #[command(alias = "t")]
    Task(TaskArgs),

    /// Manage projects (add, list, rename, priority, delete)
    ///
    /// Projects group tasks. Deleting a project keeps its tasks and clears
    /// their project link.
    ///
    /// # Examples
    ///
    ///   focusflow project add "Работа" --priority high
    ///   focusflow project list
    #[command(alias = "p")]
    Project(ProjectArgs),

    /// Focus queue and timed focus sessions
    ///
    /// The queue orders pending tasks by priority, then deadline, then
    /// recency, and presents them one at a time. Sessions record time
    /// actually spent on a task.
    ///
    /// # Examples
    ///
    ///   focusflow focus next
    ///   focusflow focus queue --project work
    ///   focusflow focus start 3f2a
    ///   focusflow focus finish <session-id> --minutes 25
    #[command(alias = "f")]
    Focus(FocusArgs),

    /// Deadline reminders
    ///
    /// Reminders are stored timestamps on tasks; listing what is due is up
    /// to you (or a cron job). Setting a deadline schedules one
    /// automatically, lead time ahead.
    ///
    /// # Examples
    ///
    ///   focusflow reminder due
    ///   focusflow reminder set 3f2a завтра 9:00
    ///   focusflow reminder snooze 3f2a --minutes 15
    Reminder(ReminderArgs),

    /// Productivity statistics
    ///
    /// Completion counts, focus time, and streaks. `stats calendar` prints
    /// a per-day completion series.
    ///
    /// # Examples
    ///
    ///   focusflow stats
    ///   focusflow stats calendar --days 14
    Stats(StatsArgs),

    /// Personal finance ledger (transactions and debts)
    ///
    /// # Examples
    ///
    ///   focusflow finance spend 450 продукты
    ///   focusflow finance income 50000 зарплата
    ///   focusflow finance debt-add Олег 5000 --owed-by-me
    ///   focusflow finance summary
    Finance(FinanceArgs),

    /// Export or import the full data bundle
    ///
    /// The bundle is a JSON file containing every task, project, session,
    /// finance record, and the settings row.
    ///
    /// # Examples
    ///
    ///   focusflow backup export
    ///   focusflow backup import ~/.focusflow/backups/focusflow-20240101-090000.json
    Backup(BackupArgs),

    /// Show or change application settings
    ///
    /// # Examples
    ///
    ///   focusflow settings show
    ///   focusflow settings set pomodoro_length 50
    ///   focusflow settings set reminder_lead_minutes 15
    Settings(SettingsArgs),

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   focusflow completions bash > /etc/bash_completion.d/focusflow
    ///   focusflow completions zsh > ~/.zfunc/_focusflow
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct AddArgs {
    /// The task text, natural language welcome
    pub text: String,

    /// Attach to a project (id, unique id prefix, or exact name)
    #[arg(short, long)]
    pub project: Option<String>,

    /// Free-form notes stored with the task
    #[arg(short, long)]
    pub notes: Option<String>,

    /// Estimated minutes of work
    #[arg(short, long)]
    pub estimate: Option<u32>,

    /// Show what would be created without writing anything
    #[arg(long)]
    pub parse_only: bool,
}

#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks
    List {
        /// Filter by status (todo, doing, done)
        #[arg(short, long)]
        status: Option<Status>,
        /// Filter by project (id, unique prefix, or exact name)
        #[arg(short, long)]
        project: Option<String>,
        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show task details
    Show {
        /// Task id or unique prefix
        id: String,
    },
    /// Mark a task as in progress
    Start {
        /// Task id or unique prefix
        id: String,
    },
    /// Mark a task as done
    Done {
        /// Task id or unique prefix
        id: String,
    },
    /// Move a finished or in-progress task back to todo
    Reopen {
        /// Task id or unique prefix
        id: String,
    },
    /// Change a task's title
    Rename {
        /// Task id or unique prefix
        id: String,
        /// The new title
        title: String,
    },
    /// Change a task's priority
    Priority {
        /// Task id or unique prefix
        id: String,
        /// New priority (low, normal, high)
        priority: Priority,
    },
    /// Replace a task's tags
    ///
    /// Pass the new tag list (without `#`); pass none to clear all tags.
    Tag {
        /// Task id or unique prefix
        id: String,
        /// New tag list, replacing the old one
        tags: Vec<String>,
    },
    /// Set or clear a task's deadline
    ///
    /// Accepts the same natural-language phrases as `add` ("завтра 18:00",
    /// "через 2 дн", "15:30"), or the word "clear" to remove the deadline.
    Deadline {
        /// Task id or unique prefix
        id: String,
        /// Natural-language date phrase, or "clear"
        #[arg(required = true)]
        when: Vec<String>,
    },
    /// Delete a task
    Delete {
        /// Task id or unique prefix
        id: String,
    },
}

#[derive(Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommands,
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a project
    Add {
        /// Project name
        name: String,
        /// Display color (hex)
        #[arg(short, long, default_value = "#6c5ce7")]
        color: String,
        /// Project priority (low, normal, high)
        #[arg(short, long, default_value = "normal")]
        priority: Priority,
    },
    /// List all projects
    List,
    /// Rename a project
    Rename {
        /// Project id, unique prefix, or exact name
        id: String,
        /// The new name
        name: String,
    },
    /// Change a project's priority
    Priority {
        /// Project id, unique prefix, or exact name
        id: String,
        /// New priority (low, normal, high)
        priority: Priority,
    },
    /// Delete a project (tasks stay, unlinked)
    Delete {
        /// Project id, unique prefix, or exact name
        id: String,
    },
}

#[derive(Args)]
pub struct FocusArgs {
    #[command(subcommand)]
    pub command: FocusCommands,
}

#[derive(Subcommand)]
pub enum FocusCommands {
    /// Show the whole focus queue in order
    Queue {
        /// Limit the queue to one project
        #[arg(short, long)]
        project: Option<String>,
    },
    /// Show the task to work on right now (head of the queue)
    Next {
        /// Limit the queue to one project
        #[arg(short, long)]
        project: Option<String>,
    },
    /// Start a timed focus session on a task
    Start {
        /// Task id or unique prefix
        task_id: String,
    },
    /// Finish a session, recording the minutes worked
    Finish {
        /// Session id (printed by `focus start`)
        session_id: String,
        /// Minutes actually worked
        #[arg(short, long)]
        minutes: i64,
    },
    /// Cancel a session, optionally recording partial minutes
    Cancel {
        /// Session id (printed by `focus start`)
        session_id: String,
        /// Minutes worked before cancelling
        #[arg(short, long, default_value_t = 0)]
        minutes: i64,
    },
}

#[derive(Args)]
pub struct ReminderArgs {
    #[command(subcommand)]
    pub command: ReminderCommands,
}

#[derive(Subcommand)]
pub enum ReminderCommands {
    /// Set a reminder from a natural-language phrase
    Set {
        /// Task id or unique prefix
        id: String,
        /// Natural-language date phrase ("завтра 9:00", "через 30 минут")
        #[arg(required = true)]
        when: Vec<String>,
    },
    /// Clear a task's reminder
    Clear {
        /// Task id or unique prefix
        id: String,
    },
    /// Push a reminder into the future
    Snooze {
        /// Task id or unique prefix
        id: String,
        /// How far to push it
        #[arg(short, long, default_value_t = 10)]
        minutes: i64,
    },
    /// List reminders that are due now
    Due,
    /// Acknowledge fired reminders
    Ack {
        /// Task ids or unique prefixes
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: Option<StatsCommands>,
}

#[derive(Subcommand)]
pub enum StatsCommands {
    /// Per-day completion counts for the calendar heatmap
    Calendar {
        /// How many days back to include
        #[arg(short, long, default_value_t = 30)]
        days: u32,
    },
}

#[derive(Args)]
pub struct FinanceArgs {
    #[command(subcommand)]
    pub command: FinanceCommands,
}

#[derive(Subcommand)]
pub enum FinanceCommands {
    /// Record an expense
    Spend {
        /// Amount spent
        amount: f64,
        /// Category label
        category: String,
        /// Optional description
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Record income
    Income {
        /// Amount received
        amount: f64,
        /// Category label
        category: String,
        /// Optional description
        #[arg(short, long)]
        note: Option<String>,
    },
    /// List transactions, newest first
    Transactions {
        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Delete a transaction
    RemoveTransaction {
        /// Transaction id or unique prefix
        id: String,
    },
    /// Record a debt
    DebtAdd {
        /// Who the debt is with
        person: String,
        /// Amount owed
        amount: f64,
        /// The debt is mine to pay (default: they owe me)
        #[arg(long)]
        owed_by_me: bool,
        /// Currency code
        #[arg(long, default_value = "RUB")]
        currency: String,
        /// Natural-language due date ("через 30 дн", "в пятницу")
        #[arg(long)]
        due: Option<String>,
    },
    /// List debts
    Debts,
    /// Settle (remove) a debt
    Settle {
        /// Debt id
        id: String,
    },
    /// Income/expense totals plus open debts
    Summary,
}

#[derive(Args)]
pub struct BackupArgs {
    #[command(subcommand)]
    pub command: BackupCommands,
}

#[derive(Subcommand)]
pub enum BackupCommands {
    /// Write the full data bundle to a JSON file
    Export {
        /// Target file (default: a timestamped file under ~/.focusflow/backups/)
        path: Option<std::path::PathBuf>,
    },
    /// Replace the database contents from a bundle
    Import {
        /// Bundle file to read
        path: std::path::PathBuf,
    },
}

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,
    /// Change one setting
    ///
    /// Keys: pomodoro_length, short_break_length, long_break_length,
    /// pomodoros_until_long_break, sound_enabled, auto_start_breaks,
    /// auto_start_pomodoros, reminder_lead_minutes
    Set {
        /// Setting name
        key: String,
        /// New value
        value: String,
    },
}
