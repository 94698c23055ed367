//! Command implementations for focusflow.
//!
//! This module contains the implementation of all CLI commands.

mod add;
mod backup;
mod finance;
mod focus;
mod project;
mod reminder;
mod settings;
mod shell;
mod stats;
mod task;

pub use add::quick_add;
pub use backup::backup;
pub use finance::finance;
pub use focus::focus;
pub use project::project;
pub use reminder::reminder;
pub use settings::settings;
pub use shell::completions;
pub use stats::stats;
pub use task::task;

use crate::core::parse_intent;
use crate::error::FlowError;

/// Turn a natural-language phrase into a deadline timestamp, rejecting
/// phrases with no recognizable date or time.
fn parse_deadline_phrase(phrase: &str) -> Result<i64, FlowError> {
    parse_intent(phrase).deadline.ok_or_else(|| {
        FlowError::InvalidInput(format!("no date or time recognized in '{phrase}'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deadline_phrase_accepts_dates() {
        assert!(parse_deadline_phrase("завтра 15:00").is_ok());
        assert!(parse_deadline_phrase("через 2 часа").is_ok());
    }

    #[test]
    fn test_parse_deadline_phrase_rejects_prose() {
        assert!(parse_deadline_phrase("когда-нибудь потом").is_err());
    }
}
