//! Stats subcommands.

use crate::cli::args::{OutputFormat, StatsCommands};
use crate::error::FlowError;
use crate::output::{format_series, format_stats};
use crate::storage::{stats, Database};

/// Execute stats subcommands. No subcommand means the summary snapshot.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn stats(
    db: &Database,
    cmd: Option<StatsCommands>,
    format: OutputFormat,
) -> Result<String, FlowError> {
    match cmd {
        None => format_stats(&stats::user_stats(db)?, format),
        Some(StatsCommands::Calendar { days }) => {
            format_series(&stats::completion_series(db, days)?, format)
        }
    }
}
