//! Productivity statistics.
//!
//! Aggregates counts, focus time, and completion streaks from the task and
//! session tables. Day boundaries follow local time.

use std::collections::HashSet;

use chrono::{Duration, Local, NaiveDate};
use rusqlite::{params, Connection};

use crate::error::FlowError;
use crate::storage::types::{CompletionDay, UserStats};
use crate::storage::Database;

fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).unwrap_or(0)
}

/// Distinct local calendar days with at least one completion, ascending.
fn completion_days(db: &Database) -> Result<Vec<NaiveDate>, FlowError> {
    let conn = db.connection();
    let mut stmt = conn
        .prepare(
            "SELECT DATE(datetime(completed_at / 1000, 'unixepoch', 'localtime')) AS day
             FROM tasks
             WHERE completed_at IS NOT NULL
             GROUP BY day
             ORDER BY day ASC",
        )
        .map_err(|e| FlowError::Database(format!("Failed to prepare streak query: {e}")))?;

    let iter = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| FlowError::Database(format!("Failed to query streaks: {e}")))?;

    let mut days = Vec::new();
    for day in iter {
        let s = day.map_err(|e| FlowError::Database(format!("Failed to read streak day: {e}")))?;
        if let Ok(parsed) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            days.push(parsed);
        }
    }
    Ok(days)
}

fn best_streak(days: &[NaiveDate]) -> u32 {
    let mut best: u32 = 0;
    let mut run: u32 = 0;
    let mut prev: Option<NaiveDate> = None;

    for day in days {
        run = match prev {
            Some(p) if *day == p + Duration::days(1) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(*day);
    }

    best
}

fn current_streak(days: &[NaiveDate], today: NaiveDate) -> u32 {
    let set: HashSet<NaiveDate> = days.iter().copied().collect();
    let mut streak: u32 = 0;
    let mut cursor = today;

    while set.contains(&cursor) {
        streak += 1;
        cursor = cursor - Duration::days(1);
    }

    streak
}

/// Aggregate the full stats snapshot.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn user_stats(db: &Database) -> Result<UserStats, FlowError> {
    let conn = db.connection();

    let total_tasks = count(conn, "SELECT COUNT(*) FROM tasks");
    let completed_tasks = count(conn, "SELECT COUNT(*) FROM tasks WHERE status = 2");

    let total_focus_time = count(
        conn,
        "SELECT COALESCE(SUM(duration_minutes), 0)
         FROM focus_sessions
         WHERE completed = 1",
    );

    let tasks_today = count(
        conn,
        "SELECT COUNT(*) FROM tasks
         WHERE DATE(datetime(created_at / 1000, 'unixepoch', 'localtime')) = DATE('now', 'localtime')",
    );

    let tasks_week = count(
        conn,
        "SELECT COUNT(*) FROM tasks
         WHERE DATE(datetime(created_at / 1000, 'unixepoch', 'localtime')) >= DATE('now', 'localtime', '-6 days')",
    );

    let completed_today = count(
        conn,
        "SELECT COUNT(*) FROM tasks
         WHERE completed_at IS NOT NULL
           AND DATE(datetime(completed_at / 1000, 'unixepoch', 'localtime')) = DATE('now', 'localtime')",
    );

    let completed_week = count(
        conn,
        "SELECT COUNT(*) FROM tasks
         WHERE completed_at IS NOT NULL
           AND DATE(datetime(completed_at / 1000, 'unixepoch', 'localtime')) >= DATE('now', 'localtime', '-6 days')",
    );

    let days = completion_days(db)?;
    let today = Local::now().date_naive();

    Ok(UserStats {
        total_tasks,
        completed_tasks,
        completed_today,
        completed_week,
        best_streak: best_streak(&days),
        total_focus_time,
        tasks_today,
        tasks_week,
        current_streak: current_streak(&days, today),
        level: u32::try_from(completed_tasks / 10).unwrap_or(0) + 1,
        points: completed_tasks * 20,
    })
}

/// Completions per local day for the last `days` days (used for the
/// calendar heatmap).
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn completion_series(db: &Database, days: u32) -> Result<Vec<CompletionDay>, FlowError> {
    let days = days.max(1);
    let back = format!("-{} days", days - 1);

    let conn = db.connection();
    let mut stmt = conn
        .prepare(
            "SELECT
               DATE(datetime(completed_at / 1000, 'unixepoch', 'localtime')) AS day,
               COUNT(*) AS count
             FROM tasks
             WHERE completed_at IS NOT NULL
               AND day >= DATE('now', 'localtime', ?1)
             GROUP BY day
             ORDER BY day ASC",
        )
        .map_err(|e| FlowError::Database(format!("Failed to prepare series query: {e}")))?;

    let iter = stmt
        .query_map(params![back], |row| {
            Ok(CompletionDay {
                day: row.get(0)?,
                count: row.get(1)?,
            })
        })
        .map_err(|e| FlowError::Database(format!("Failed to query series: {e}")))?;

    let mut series = Vec::new();
    for day in iter {
        series.push(day.map_err(|e| FlowError::Database(format!("Failed to read series: {e}")))?);
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Priority;
    use crate::storage::types::{NewTask, Status};
    use crate::storage::{sessions, tasks};

    fn seed_task(db: &Database, id: &str, created_at: i64) {
        let task = NewTask {
            id: id.to_string(),
            project_id: None,
            title: format!("Task {id}"),
            description: None,
            priority: Priority::Normal,
            status: Status::Todo,
            created_at,
            deadline: None,
            estimated_minutes: None,
            actual_minutes: None,
            tags: vec![],
            remind_at: None,
        };
        tasks::add(db, &task).unwrap();
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_best_streak_counts_consecutive_runs() {
        let days = vec![
            day(2024, 1, 1),
            day(2024, 1, 2),
            day(2024, 1, 3),
            day(2024, 1, 7),
            day(2024, 1, 8),
        ];
        assert_eq!(best_streak(&days), 3);
    }

    #[test]
    fn test_best_streak_empty() {
        assert_eq!(best_streak(&[]), 0);
    }

    #[test]
    fn test_current_streak_ends_today() {
        let days = vec![day(2024, 1, 5), day(2024, 1, 6), day(2024, 1, 7)];
        assert_eq!(current_streak(&days, day(2024, 1, 7)), 3);
        assert_eq!(current_streak(&days, day(2024, 1, 9)), 0);
    }

    #[test]
    fn test_counts_and_level() {
        let db = Database::open_in_memory().unwrap();
        let now_ms = Local::now().timestamp_millis();

        seed_task(&db, "t1", now_ms);
        seed_task(&db, "t2", now_ms);
        tasks::set_status(&db, "t1", Status::Done, now_ms).unwrap();

        let stats = user_stats(&db).unwrap();
        assert_eq!(stats.total_tasks, 2);
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.tasks_today, 2);
        assert_eq!(stats.completed_today, 1);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.points, 20);
    }

    #[test]
    fn test_focus_time_sums_completed_sessions() {
        let db = Database::open_in_memory().unwrap();
        let now_ms = Local::now().timestamp_millis();
        seed_task(&db, "t1", now_ms);

        let done = sessions::start(&db, "t1", now_ms).unwrap();
        sessions::finish(&db, &done.id, 25, true, now_ms).unwrap();

        let abandoned = sessions::start(&db, "t1", now_ms).unwrap();
        sessions::finish(&db, &abandoned.id, 10, false, now_ms).unwrap();

        let stats = user_stats(&db).unwrap();
        assert_eq!(stats.total_focus_time, 25);
    }

    #[test]
    fn test_completion_series_includes_today() {
        let db = Database::open_in_memory().unwrap();
        let now_ms = Local::now().timestamp_millis();

        seed_task(&db, "t1", now_ms);
        tasks::set_status(&db, "t1", Status::Done, now_ms).unwrap();

        let series = completion_series(&db, 7).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].count, 1);
    }

    #[test]
    fn test_completion_series_empty() {
        let db = Database::open_in_memory().unwrap();
        assert!(completion_series(&db, 30).unwrap().is_empty());
    }
}
