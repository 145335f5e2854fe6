//! Dose reminder engine — turns a reminder form into OS notification triggers
//! and retires them as a group.
//!
//! Scheduling semantics:
//! - Weekly reminders register one calendar-repeating trigger per selected
//!   weekday. The platform re-fires them; nothing is re-armed here.
//! - One-shot reminders register a single relative trigger with a minimum
//!   lead of [`MIN_LEAD_SECS`] seconds.
//!
//! Saving is all-or-nothing: if any registration fails, triggers already
//! registered for this reminder are cancelled and nothing is persisted.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::db::repository::{
    delete_logs_for_reminder, delete_reminder, get_all_reminders, get_reminder, insert_reminder,
};
use crate::db::DatabaseError;
use crate::models::{iso_from_weekday, weekday_from_iso, Reminder, ReminderSchedule};
use crate::scheduler::{NotificationContent, NotificationScheduler, ScheduleError, Trigger};

/// One-shot triggers never fire sooner than this after registration.
pub const MIN_LEAD_SECS: u64 = 5;

/// Title used for every dose notification.
pub const NOTIFICATION_TITLE: &str = "Time to take your medicine";

#[derive(Error, Debug)]
pub enum ReminderError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Reminder form contents, as entered by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderInput {
    pub medicine_name: String,
    pub dosage: String,
    pub time: NaiveTime,
    pub schedule: ReminderSchedule,
}

/// Validates the form, registers one trigger per occurrence, and persists the
/// reminder with the collected identifiers.
///
/// All-or-nothing: on any registration or persistence failure, identifiers
/// already obtained are cancelled best-effort and storage is left unchanged.
pub fn create_reminder(
    conn: &Connection,
    scheduler: &mut dyn NotificationScheduler,
    input: &ReminderInput,
    now: NaiveDateTime,
) -> Result<Reminder, ReminderError> {
    let medicine_name = input.medicine_name.trim();
    if medicine_name.is_empty() {
        return Err(ReminderError::Validation("Medicine name is required".into()));
    }
    let dosage = input.dosage.trim();
    if dosage.is_empty() {
        return Err(ReminderError::Validation("Dosage is required".into()));
    }
    let schedule = validated_schedule(&input.schedule)?;
    let triggers = build_triggers(&schedule, input.time, now)?;

    let id = Uuid::new_v4();
    let content = NotificationContent {
        title: NOTIFICATION_TITLE.into(),
        body: format!("{medicine_name} — {dosage}"),
        reminder_id: id,
    };

    let mut notification_ids = Vec::with_capacity(triggers.len());
    for trigger in &triggers {
        match scheduler.schedule(&content, trigger) {
            Ok(notification_id) => notification_ids.push(notification_id),
            Err(e) => {
                cancel_registered(scheduler, &notification_ids);
                return Err(e.into());
            }
        }
    }

    let reminder = Reminder {
        id,
        medicine_name: medicine_name.to_string(),
        dosage: dosage.to_string(),
        time: input.time,
        schedule,
        notification_ids,
    };

    if let Err(e) = insert_reminder(conn, &reminder) {
        cancel_registered(scheduler, &reminder.notification_ids);
        return Err(e.into());
    }

    tracing::info!(
        reminder_id = %reminder.id,
        triggers = reminder.notification_ids.len(),
        "Reminder scheduled"
    );
    Ok(reminder)
}

/// Retires a reminder: cancels its triggers, removes the record, and prunes
/// log entries that back-reference it.
///
/// Returns `false` when the id was already gone — calling this twice is a
/// no-op, not an error.
pub fn cancel_reminder(
    conn: &Connection,
    scheduler: &mut dyn NotificationScheduler,
    id: &Uuid,
) -> Result<bool, ReminderError> {
    let Some(reminder) = get_reminder(conn, id)? else {
        return Ok(false);
    };

    for notification_id in &reminder.notification_ids {
        if let Err(e) = scheduler.cancel(notification_id) {
            // Best-effort: an identifier the platform no longer knows must
            // not block retiring the rest of the group.
            tracing::warn!(
                notification_id = %notification_id,
                error = %e,
                "Trigger cancellation failed"
            );
        }
    }

    delete_reminder(conn, id)?;
    let pruned = delete_logs_for_reminder(conn, id)?;

    tracing::info!(reminder_id = %id, pruned_logs = pruned, "Reminder cancelled");
    Ok(true)
}

pub fn list_reminders(conn: &Connection) -> Result<Vec<Reminder>, ReminderError> {
    Ok(get_all_reminders(conn)?)
}

/// Cancels every scheduled notification of the application (the "clear all"
/// escape hatch). Stored reminder records are untouched.
pub fn clear_all_scheduled(
    scheduler: &mut dyn NotificationScheduler,
) -> Result<(), ReminderError> {
    scheduler.cancel_all()?;
    Ok(())
}

/// Reminders due in the given calendar slot: weekly ones whose day set covers
/// the date's weekday, plus one-shot ones pinned to that exact date.
pub fn reminders_for_slot<'a>(
    reminders: &'a [Reminder],
    date: NaiveDate,
    slot: NaiveTime,
) -> Vec<&'a Reminder> {
    let weekday = iso_from_weekday(date.weekday());
    reminders
        .iter()
        .filter(|r| r.time == slot)
        .filter(|r| match &r.schedule {
            ReminderSchedule::Weekly { days } => days.contains(&weekday),
            ReminderSchedule::Once { date: d } => *d == date,
        })
        .collect()
}

// ── Internal ────────────────────────────────────────────────────────────────

fn validated_schedule(schedule: &ReminderSchedule) -> Result<ReminderSchedule, ReminderError> {
    match schedule {
        ReminderSchedule::Weekly { days } => {
            if days.is_empty() {
                return Err(ReminderError::Validation(
                    "Select at least one weekday".into(),
                ));
            }
            let mut days = days.clone();
            days.sort_unstable();
            days.dedup();
            if days.iter().any(|d| !(1..=7).contains(d)) {
                return Err(ReminderError::Validation(
                    "Weekday numbers must be 1-7 (Monday = 1)".into(),
                ));
            }
            Ok(ReminderSchedule::Weekly { days })
        }
        ReminderSchedule::Once { date } => Ok(ReminderSchedule::Once { date: *date }),
    }
}

fn build_triggers(
    schedule: &ReminderSchedule,
    time: NaiveTime,
    now: NaiveDateTime,
) -> Result<Vec<Trigger>, ReminderError> {
    match schedule {
        ReminderSchedule::Weekly { days } => days
            .iter()
            .map(|&day| {
                weekday_from_iso(day)
                    .map(|weekday| Trigger::Weekly {
                        weekday,
                        hour: time.hour(),
                        minute: time.minute(),
                    })
                    .ok_or_else(|| {
                        ReminderError::Validation(format!("Invalid weekday number: {day}"))
                    })
            })
            .collect(),
        ReminderSchedule::Once { date } => {
            let fire_at = date.and_time(time);
            let delay_secs = (fire_at - now).num_seconds().max(MIN_LEAD_SECS as i64) as u64;
            Ok(vec![Trigger::Once { delay_secs }])
        }
    }
}

fn cancel_registered(scheduler: &mut dyn NotificationScheduler, notification_ids: &[String]) {
    for notification_id in notification_ids {
        if let Err(e) = scheduler.cancel(notification_id) {
            tracing::warn!(
                notification_id = %notification_id,
                error = %e,
                "Rollback cancellation failed"
            );
        }
    }
}
