use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// When a reminder fires.
///
/// Weekday numbering is ISO 8601 throughout: Monday = 1 … Sunday = 7.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderSchedule {
    /// Repeats every week on the given ISO weekdays.
    Weekly { days: Vec<u8> },
    /// Fires once on the given calendar date.
    Once { date: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub medicine_name: String,
    pub dosage: String,
    pub time: NaiveTime,
    pub schedule: ReminderSchedule,
    /// Platform trigger identifiers, one per registered notification.
    /// Kept only so the whole group can be cancelled later.
    pub notification_ids: Vec<String>,
}

/// Maps an ISO weekday number (Monday = 1 … Sunday = 7) to `chrono::Weekday`.
pub fn weekday_from_iso(day: u8) -> Option<Weekday> {
    match day {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}

/// Inverse of [`weekday_from_iso`].
pub fn iso_from_weekday(weekday: Weekday) -> u8 {
    weekday.number_from_monday() as u8
}
