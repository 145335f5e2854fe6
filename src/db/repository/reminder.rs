use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Reminder, ReminderSchedule};

const TIME_FORMAT: &str = "%H:%M";

pub fn insert_reminder(conn: &Connection, reminder: &Reminder) -> Result<(), DatabaseError> {
    let (days_json, date) = match &reminder.schedule {
        ReminderSchedule::Weekly { days } => {
            let json = serde_json::to_string(days)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
            (Some(json), None)
        }
        ReminderSchedule::Once { date } => (None, Some(date.to_string())),
    };
    let notification_ids_json = serde_json::to_string(&reminder.notification_ids)
        .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;

    conn.execute(
        "INSERT INTO reminders (id, medicine_name, dosage, time, days, date, notification_ids)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            reminder.id.to_string(),
            reminder.medicine_name,
            reminder.dosage,
            reminder.time.format(TIME_FORMAT).to_string(),
            days_json,
            date,
            notification_ids_json,
        ],
    )?;
    Ok(())
}

pub fn get_reminder(conn: &Connection, id: &Uuid) -> Result<Option<Reminder>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, medicine_name, dosage, time, days, date, notification_ids
         FROM reminders WHERE id = ?1",
    )?;

    match stmt.query_row(params![id.to_string()], reminder_row) {
        Ok(row) => Ok(Some(reminder_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::from(e)),
    }
}

pub fn get_all_reminders(conn: &Connection) -> Result<Vec<Reminder>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, medicine_name, dosage, time, days, date, notification_ids
         FROM reminders ORDER BY time ASC, medicine_name ASC",
    )?;

    let rows = stmt.query_map([], reminder_row)?;

    let mut reminders = Vec::new();
    for row in rows {
        reminders.push(reminder_from_row(row?)?);
    }
    Ok(reminders)
}

/// Deletes a reminder by id. Returns the number of rows removed (0 or 1).
pub fn delete_reminder(conn: &Connection, id: &Uuid) -> Result<usize, DatabaseError> {
    let removed = conn.execute(
        "DELETE FROM reminders WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(removed)
}

struct ReminderRow {
    id: String,
    medicine_name: String,
    dosage: String,
    time: String,
    days: Option<String>,
    date: Option<String>,
    notification_ids: String,
}

fn reminder_row(row: &rusqlite::Row<'_>) -> Result<ReminderRow, rusqlite::Error> {
    Ok(ReminderRow {
        id: row.get(0)?,
        medicine_name: row.get(1)?,
        dosage: row.get(2)?,
        time: row.get(3)?,
        days: row.get(4)?,
        date: row.get(5)?,
        notification_ids: row.get(6)?,
    })
}

fn reminder_from_row(row: ReminderRow) -> Result<Reminder, DatabaseError> {
    let schedule = match (&row.days, &row.date) {
        (Some(days_json), _) => ReminderSchedule::Weekly {
            days: serde_json::from_str(days_json)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        },
        (None, Some(date)) => ReminderSchedule::Once {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        },
        (None, None) => {
            return Err(DatabaseError::ConstraintViolation(format!(
                "Reminder {} has neither weekdays nor a date",
                row.id
            )))
        }
    };

    Ok(Reminder {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        medicine_name: row.medicine_name,
        dosage: row.dosage,
        time: NaiveTime::parse_from_str(&row.time, TIME_FORMAT)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        schedule,
        notification_ids: serde_json::from_str(&row.notification_ids)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn weekly(days: Vec<u8>) -> Reminder {
        Reminder {
            id: Uuid::new_v4(),
            medicine_name: "Paracetamol".into(),
            dosage: "500 mg".into(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            schedule: ReminderSchedule::Weekly { days },
            notification_ids: vec!["trig-1".into(), "trig-2".into()],
        }
    }

    #[test]
    fn weekly_reminder_round_trips() {
        let conn = open_memory_database().unwrap();
        let reminder = weekly(vec![1, 3]);
        insert_reminder(&conn, &reminder).unwrap();

        let loaded = get_reminder(&conn, &reminder.id).unwrap().unwrap();
        assert_eq!(loaded, reminder);
    }

    #[test]
    fn one_shot_reminder_round_trips() {
        let conn = open_memory_database().unwrap();
        let reminder = Reminder {
            id: Uuid::new_v4(),
            medicine_name: "Amoxicillin".into(),
            dosage: "250 mg".into(),
            time: NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
            schedule: ReminderSchedule::Once {
                date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            },
            notification_ids: vec!["trig-9".into()],
        };
        insert_reminder(&conn, &reminder).unwrap();

        let loaded = get_reminder(&conn, &reminder.id).unwrap().unwrap();
        assert_eq!(loaded, reminder);
    }

    #[test]
    fn get_missing_reminder_returns_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_reminder(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn delete_is_idempotent() {
        let conn = open_memory_database().unwrap();
        let reminder = weekly(vec![5]);
        insert_reminder(&conn, &reminder).unwrap();

        assert_eq!(delete_reminder(&conn, &reminder.id).unwrap(), 1);
        assert_eq!(delete_reminder(&conn, &reminder.id).unwrap(), 0);
    }

    #[test]
    fn duplicate_content_is_allowed() {
        // Dedup is by generated id only, never by content.
        let conn = open_memory_database().unwrap();
        insert_reminder(&conn, &weekly(vec![1])).unwrap();
        insert_reminder(&conn, &weekly(vec![1])).unwrap();
        assert_eq!(get_all_reminders(&conn).unwrap().len(), 2);
    }
}
