//! Seam between the reminder engine and the platform notification API.
//!
//! The host shell (mobile or desktop) implements [`NotificationScheduler`]
//! over whatever the OS provides; the library only ever sees opaque trigger
//! identifiers. Registration is synchronous from the caller's point of view —
//! delivery itself is never awaited.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Notification permission denied")]
    PermissionDenied,

    #[error("Trigger registration failed: {0}")]
    Registration(String),

    #[error("Trigger cancellation failed: {0}")]
    Cancellation(String),
}

/// Payload of a single scheduled notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    /// Carried through delivery so taps can be traced back to the reminder.
    pub reminder_id: Uuid,
}

/// When a trigger fires.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// Repeats every week at `hour:minute` on `weekday`.
    Weekly {
        weekday: Weekday,
        hour: u32,
        minute: u32,
    },
    /// Fires once, `delay_secs` seconds after registration.
    Once { delay_secs: u64 },
}

pub trait NotificationScheduler {
    /// Registers a trigger and returns the platform-assigned identifier.
    fn schedule(
        &mut self,
        content: &NotificationContent,
        trigger: &Trigger,
    ) -> Result<String, ScheduleError>;

    /// Cancels one scheduled trigger. Identifiers the platform no longer
    /// knows (already fired, already cancelled) must not be an error.
    fn cancel(&mut self, notification_id: &str) -> Result<(), ScheduleError>;

    /// Cancels every trigger this application registered.
    fn cancel_all(&mut self) -> Result<(), ScheduleError>;
}
