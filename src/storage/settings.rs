//! Application settings storage.
//!
//! Settings live in a single database row so they travel with the data in
//! backups. Missing row means defaults.

use rusqlite::{params, OptionalExtension};

use crate::error::FlowError;
use crate::storage::types::AppSettings;
use crate::storage::Database;

/// Load settings, falling back to defaults when none are saved yet.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get(db: &Database) -> Result<AppSettings, FlowError> {
    let row = db
        .connection()
        .query_row(
            "SELECT
               pomodoro_length,
               short_break_length,
               long_break_length,
               pomodoros_until_long_break,
               sound_enabled,
               auto_start_breaks,
               auto_start_pomodoros,
               reminder_lead_minutes
             FROM settings
             WHERE id = 1",
            [],
            |row| {
                Ok(AppSettings {
                    pomodoro_length: row.get(0)?,
                    short_break_length: row.get(1)?,
                    long_break_length: row.get(2)?,
                    pomodoros_until_long_break: row.get(3)?,
                    sound_enabled: row.get(4)?,
                    auto_start_breaks: row.get(5)?,
                    auto_start_pomodoros: row.get(6)?,
                    reminder_lead_minutes: row.get(7)?,
                })
            },
        )
        .optional()
        .map_err(|e| FlowError::Database(format!("Failed to load settings: {e}")))?;

    Ok(row.unwrap_or_default())
}

/// Save settings (upsert into the single row).
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn save(db: &Database, settings: &AppSettings, now_ms: i64) -> Result<(), FlowError> {
    db.connection()
        .execute(
            "INSERT INTO settings (
               id,
               pomodoro_length,
               short_break_length,
               long_break_length,
               pomodoros_until_long_break,
               sound_enabled,
               auto_start_breaks,
               auto_start_pomodoros,
               reminder_lead_minutes,
               updated_at
             ) VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(id) DO UPDATE SET
               pomodoro_length = excluded.pomodoro_length,
               short_break_length = excluded.short_break_length,
               long_break_length = excluded.long_break_length,
               pomodoros_until_long_break = excluded.pomodoros_until_long_break,
               sound_enabled = excluded.sound_enabled,
               auto_start_breaks = excluded.auto_start_breaks,
               auto_start_pomodoros = excluded.auto_start_pomodoros,
               reminder_lead_minutes = excluded.reminder_lead_minutes,
               updated_at = excluded.updated_at",
            params![
                settings.pomodoro_length,
                settings.short_break_length,
                settings.long_break_length,
                settings.pomodoros_until_long_break,
                settings.sound_enabled,
                settings.auto_start_breaks,
                settings.auto_start_pomodoros,
                settings.reminder_lead_minutes,
                now_ms,
            ],
        )
        .map_err(|e| FlowError::Database(format!("Failed to save settings: {e}")))?;

    Ok(())
}
