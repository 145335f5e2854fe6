//! Notification history — append-only log of delivered or tapped
//! notifications, grouped for display and tracked read/unread.
//!
//! The host shell owns the platform listener registration; it forwards each
//! delivery or tap here as a [`NotificationEvent`]. Log entries outlive the
//! reminder that caused them except through the cancellation cascade in
//! [`crate::reminders::cancel_reminder`].

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repository::{self, get_all_logs};
use crate::db::DatabaseError;
use crate::models::enums::NotificationKind;
use crate::models::NotificationLog;

/// How a notification reached the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTrigger {
    /// The platform delivered the notification.
    Delivered,
    /// The user tapped the notification.
    Tapped,
}

/// A delivery or tap callback, forwarded by the host shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub trigger: EventTrigger,
    pub title: String,
    pub subtitle: String,
    pub kind: NotificationKind,
    /// Originating reminder, when the payload carried one.
    pub reminder_id: Option<Uuid>,
}

/// Log entries partitioned for the history screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotificationFeed {
    pub today: Vec<NotificationLog>,
    pub yesterday: Vec<NotificationLog>,
    pub earlier: Vec<NotificationLog>,
}

/// Appends a fresh unread log entry for the event and returns it.
pub fn record_event(
    conn: &Connection,
    event: &NotificationEvent,
    now: NaiveDateTime,
) -> Result<NotificationLog, DatabaseError> {
    let log = NotificationLog {
        id: Uuid::new_v4(),
        title: event.title.clone(),
        subtitle: event.subtitle.clone(),
        timestamp: now,
        kind: event.kind,
        is_read: false,
        reminder_id: event.reminder_id,
    };
    repository::insert_log(conn, &log)?;

    tracing::debug!(
        log_id = %log.id,
        trigger = ?event.trigger,
        "Notification recorded"
    );
    Ok(log)
}

/// Loads the full history grouped into today / yesterday / earlier.
pub fn notification_feed(
    conn: &Connection,
    today: NaiveDate,
) -> Result<NotificationFeed, DatabaseError> {
    Ok(bucket_logs(get_all_logs(conn)?, today))
}

/// Sorts newest-first, then partitions by calendar date relative to `today`.
pub fn bucket_logs(mut logs: Vec<NotificationLog>, today: NaiveDate) -> NotificationFeed {
    logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let yesterday = today.pred_opt();
    let mut feed = NotificationFeed::default();
    for log in logs {
        let date = log.timestamp.date();
        if date == today {
            feed.today.push(log);
        } else if Some(date) == yesterday {
            feed.yesterday.push(log);
        } else {
            feed.earlier.push(log);
        }
    }
    feed
}

/// Flips a single entry's read flag. Returns `false` when the id is unknown.
pub fn toggle_read(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    Ok(repository::toggle_read(conn, id)? > 0)
}

/// Deletes a single entry. Returns `false` when the id was already gone.
pub fn delete_log(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    Ok(repository::delete_log(conn, id)? > 0)
}

/// Unread entries, for the badge.
pub fn unread_count(conn: &Connection) -> Result<i64, DatabaseError> {
    repository::unread_count(conn)
}
