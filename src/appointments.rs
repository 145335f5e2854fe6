//! Doctor appointments — booking form validation and the schedule list.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::db::repository::{
    delete_appointment as delete_appointment_row, get_all_appointments, insert_appointment,
};
use crate::db::DatabaseError;
use crate::models::enums::Specialty;
use crate::models::Appointment;

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Booking form contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentInput {
    pub doctor: String,
    pub specialty: Specialty,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Validates the booking and inserts it with a generated id.
///
/// The date must be today or later; a booking for today must still be in the
/// future at save time.
pub fn create_appointment(
    conn: &Connection,
    input: &AppointmentInput,
    now: NaiveDateTime,
) -> Result<Appointment, AppointmentError> {
    let doctor = input.doctor.trim();
    if doctor.is_empty() {
        return Err(AppointmentError::Validation("Doctor name is required".into()));
    }
    if input.date < now.date() {
        return Err(AppointmentError::Validation(
            "Appointment date must be today or in the future".into(),
        ));
    }
    if input.date == now.date() && input.date.and_time(input.time) <= now {
        return Err(AppointmentError::Validation(
            "Appointment time for today must be in the future".into(),
        ));
    }

    let appointment = Appointment {
        id: Uuid::new_v4(),
        doctor: doctor.to_string(),
        specialty: input.specialty,
        date: input.date,
        time: input.time,
    };
    insert_appointment(conn, &appointment)?;

    tracing::info!(
        appointment_id = %appointment.id,
        specialty = appointment.specialty.as_str(),
        date = %appointment.date,
        "Appointment booked"
    );
    Ok(appointment)
}

/// All appointments, soonest first.
pub fn list_appointments(conn: &Connection) -> Result<Vec<Appointment>, AppointmentError> {
    Ok(get_all_appointments(conn)?)
}

/// Appointments dated today or later, for the dashboard.
pub fn upcoming_appointments(
    conn: &Connection,
    today: NaiveDate,
) -> Result<Vec<Appointment>, AppointmentError> {
    let upcoming = get_all_appointments(conn)?
        .into_iter()
        .filter(|a| a.date >= today)
        .collect();
    Ok(upcoming)
}

/// Deletes an appointment by id; deleting an absent id is a no-op.
pub fn delete_appointment(conn: &Connection, id: &Uuid) -> Result<(), AppointmentError> {
    let removed = delete_appointment_row(conn, id)?;
    if removed > 0 {
        tracing::info!(appointment_id = %id, "Appointment deleted");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2026-02-02 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn booking(date: &str, time: &str) -> AppointmentInput {
        AppointmentInput {
            doctor: "Dr. Orlova".into(),
            specialty: Specialty::Cardiologist,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
        }
    }

    #[test]
    fn booking_in_the_future_is_stored() {
        let conn = open_memory_database().unwrap();
        let appointment = create_appointment(&conn, &booking("2026-03-10", "14:30"), now()).unwrap();
        assert_eq!(list_appointments(&conn).unwrap(), vec![appointment]);
    }

    #[test]
    fn empty_doctor_is_rejected() {
        let conn = open_memory_database().unwrap();
        let input = AppointmentInput {
            doctor: "  ".into(),
            ..booking("2026-03-10", "14:30")
        };
        let err = create_appointment(&conn, &input, now()).unwrap_err();
        assert!(matches!(err, AppointmentError::Validation(_)));
        assert!(list_appointments(&conn).unwrap().is_empty());
    }

    #[test]
    fn past_date_is_rejected() {
        let conn = open_memory_database().unwrap();
        let err = create_appointment(&conn, &booking("2026-02-01", "09:00"), now()).unwrap_err();
        assert!(matches!(err, AppointmentError::Validation(_)));
    }

    #[test]
    fn today_requires_future_time() {
        let conn = open_memory_database().unwrap();

        let err = create_appointment(&conn, &booking("2026-02-02", "11:00"), now()).unwrap_err();
        assert!(matches!(err, AppointmentError::Validation(_)));

        // Later today is fine.
        create_appointment(&conn, &booking("2026-02-02", "16:00"), now()).unwrap();
    }

    #[test]
    fn upcoming_excludes_past_dates() {
        let conn = open_memory_database().unwrap();
        create_appointment(&conn, &booking("2026-02-03", "09:00"), now()).unwrap();
        create_appointment(&conn, &booking("2026-03-10", "14:30"), now()).unwrap();

        // Move "today" past the first appointment.
        let later = NaiveDate::parse_from_str("2026-02-10", "%Y-%m-%d").unwrap();
        let upcoming = upcoming_appointments(&conn, later).unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].date.to_string(), "2026-03-10");
    }

    #[test]
    fn delete_by_id_survives_resorting() {
        let conn = open_memory_database().unwrap();
        let first = create_appointment(&conn, &booking("2026-02-03", "09:00"), now()).unwrap();
        let second = create_appointment(&conn, &booking("2026-02-04", "09:00"), now()).unwrap();

        delete_appointment(&conn, &first.id).unwrap();
        delete_appointment(&conn, &first.id).unwrap(); // no-op

        let remaining = list_appointments(&conn).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second.id);
    }
}
