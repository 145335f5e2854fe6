use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::NotificationKind;

/// A notification that was actually delivered to (or tapped by) the user.
/// Distinct from the Reminder that caused it: log entries survive reminder
/// deletion unless pruned by the cancellation cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationLog {
    pub id: Uuid,
    pub title: String,
    pub subtitle: String,
    pub timestamp: NaiveDateTime,
    pub kind: NotificationKind,
    pub is_read: bool,
    /// Originating reminder, when known.
    pub reminder_id: Option<Uuid>,
}
