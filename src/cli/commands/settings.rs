//! Settings subcommands.

use chrono::Utc;

use crate::cli::args::{OutputFormat, SettingsCommands};
use crate::error::FlowError;
use crate::output::format_settings;
use crate::storage::{settings, Database};

fn parse_u32(key: &str, value: &str) -> Result<u32, FlowError> {
    value
        .parse()
        .map_err(|_| FlowError::InvalidInput(format!("{key} expects a number, got '{value}'")))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, FlowError> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(FlowError::InvalidInput(format!(
            "{key} expects true/false, got '{value}'"
        ))),
    }
}

/// Execute settings subcommands.
///
/// # Errors
///
/// Returns an error for unknown keys, unparsable values, or a failed write.
pub fn settings(
    db: &Database,
    cmd: SettingsCommands,
    format: OutputFormat,
) -> Result<String, FlowError> {
    match cmd {
        SettingsCommands::Show => format_settings(&settings::get(db)?, format),
        SettingsCommands::Set { key, value } => {
            let mut current = settings::get(db)?;

            match key.as_str() {
                "pomodoro_length" => current.pomodoro_length = parse_u32(&key, &value)?,
                "short_break_length" => current.short_break_length = parse_u32(&key, &value)?,
                "long_break_length" => current.long_break_length = parse_u32(&key, &value)?,
                "pomodoros_until_long_break" => {
                    current.pomodoros_until_long_break = parse_u32(&key, &value)?;
                }
                "sound_enabled" => current.sound_enabled = parse_bool(&key, &value)?,
                "auto_start_breaks" => current.auto_start_breaks = parse_bool(&key, &value)?,
                "auto_start_pomodoros" => current.auto_start_pomodoros = parse_bool(&key, &value)?,
                "reminder_lead_minutes" => {
                    current.reminder_lead_minutes = parse_u32(&key, &value)?;
                }
                other => {
                    return Err(FlowError::InvalidInput(format!(
                        "unknown setting '{other}'"
                    )))
                }
            }

            settings::save(db, &current, Utc::now().timestamp_millis())?;
            Ok(format!("Set {key} = {value}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_numeric_key() {
        let db = Database::open_in_memory().unwrap();
        settings(
            &db,
            SettingsCommands::Set {
                key: "pomodoro_length".to_string(),
                value: "50".to_string(),
            },
            OutputFormat::Pretty,
        )
        .unwrap();

        assert_eq!(
            crate::storage::settings::get(&db).unwrap().pomodoro_length,
            50
        );
    }

    #[test]
    fn test_set_bool_key() {
        let db = Database::open_in_memory().unwrap();
        settings(
            &db,
            SettingsCommands::Set {
                key: "sound_enabled".to_string(),
                value: "off".to_string(),
            },
            OutputFormat::Pretty,
        )
        .unwrap();

        assert!(!crate::storage::settings::get(&db).unwrap().sound_enabled);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let db = Database::open_in_memory().unwrap();
        let result = settings(
            &db,
            SettingsCommands::Set {
                key: "volume".to_string(),
                value: "11".to_string(),
            },
            OutputFormat::Pretty,
        );
        assert!(matches!(result, Err(FlowError::InvalidInput(_))));
    }

    #[test]
    fn test_bad_value_rejected() {
        let db = Database::open_in_memory().unwrap();
        let result = settings(
            &db,
            SettingsCommands::Set {
                key: "pomodoro_length".to_string(),
                value: "loud".to_string(),
            },
            OutputFormat::Pretty,
        );
        assert!(matches!(result, Err(FlowError::InvalidInput(_))));
    }
}
