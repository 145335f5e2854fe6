use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::NotificationKind;
use crate::models::NotificationLog;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn insert_log(conn: &Connection, log: &NotificationLog) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO notification_logs (id, title, subtitle, timestamp, kind, is_read, reminder_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            log.id.to_string(),
            log.title,
            log.subtitle,
            log.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            log.kind.as_str(),
            log.is_read as i32,
            log.reminder_id.map(|id| id.to_string()),
        ],
    )?;
    Ok(())
}

/// All log entries, newest first.
pub fn get_all_logs(conn: &Connection) -> Result<Vec<NotificationLog>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, subtitle, timestamp, kind, is_read, reminder_id
         FROM notification_logs ORDER BY timestamp DESC",
    )?;

    let rows = stmt.query_map([], log_row)?;

    let mut logs = Vec::new();
    for row in rows {
        logs.push(log_from_row(row?)?);
    }
    Ok(logs)
}

/// Flips is_read in place. Returns the number of rows touched (0 or 1).
pub fn toggle_read(conn: &Connection, id: &Uuid) -> Result<usize, DatabaseError> {
    let changed = conn.execute(
        "UPDATE notification_logs SET is_read = 1 - is_read WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(changed)
}

/// Deletes a single log entry. Returns the number of rows removed (0 or 1).
pub fn delete_log(conn: &Connection, id: &Uuid) -> Result<usize, DatabaseError> {
    let removed = conn.execute(
        "DELETE FROM notification_logs WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(removed)
}

/// Removes every log entry that back-references the given reminder.
/// Returns the number of rows removed.
pub fn delete_logs_for_reminder(
    conn: &Connection,
    reminder_id: &Uuid,
) -> Result<usize, DatabaseError> {
    let removed = conn.execute(
        "DELETE FROM notification_logs WHERE reminder_id = ?1",
        params![reminder_id.to_string()],
    )?;
    Ok(removed)
}

pub fn unread_count(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM notification_logs WHERE is_read = 0",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

struct LogRow {
    id: String,
    title: String,
    subtitle: String,
    timestamp: String,
    kind: String,
    is_read: i32,
    reminder_id: Option<String>,
}

fn log_row(row: &rusqlite::Row<'_>) -> Result<LogRow, rusqlite::Error> {
    Ok(LogRow {
        id: row.get(0)?,
        title: row.get(1)?,
        subtitle: row.get(2)?,
        timestamp: row.get(3)?,
        kind: row.get(4)?,
        is_read: row.get(5)?,
        reminder_id: row.get(6)?,
    })
}

fn log_from_row(row: LogRow) -> Result<NotificationLog, DatabaseError> {
    Ok(NotificationLog {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        title: row.title,
        subtitle: row.subtitle,
        timestamp: NaiveDateTime::parse_from_str(&row.timestamp, TIMESTAMP_FORMAT)
            .unwrap_or_default(),
        kind: NotificationKind::from_str(&row.kind)?,
        is_read: row.is_read != 0,
        reminder_id: row.reminder_id.and_then(|s| Uuid::parse_str(&s).ok()),
    })
}
