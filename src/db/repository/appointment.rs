use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::Specialty;
use crate::models::Appointment;

const TIME_FORMAT: &str = "%H:%M";

pub fn insert_appointment(conn: &Connection, appt: &Appointment) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (id, doctor, specialty, date, time)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            appt.id.to_string(),
            appt.doctor,
            appt.specialty.as_str(),
            appt.date.to_string(),
            appt.time.format(TIME_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

/// All appointments, soonest first.
pub fn get_all_appointments(conn: &Connection) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, doctor, specialty, date, time
         FROM appointments ORDER BY date ASC, time ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut appointments = Vec::new();
    for row in rows {
        let (id, doctor, specialty, date, time) = row?;
        appointments.push(Appointment {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            doctor,
            specialty: Specialty::from_str(&specialty)?,
            date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            time: NaiveTime::parse_from_str(&time, TIME_FORMAT)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        });
    }
    Ok(appointments)
}

/// Deletes an appointment by id. Returns the number of rows removed (0 or 1).
pub fn delete_appointment(conn: &Connection, id: &Uuid) -> Result<usize, DatabaseError> {
    let removed = conn.execute(
        "DELETE FROM appointments WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn appt(doctor: &str, date: &str, time: &str) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            doctor: doctor.into(),
            specialty: Specialty::Cardiologist,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            time: NaiveTime::parse_from_str(time, TIME_FORMAT).unwrap(),
        }
    }

    #[test]
    fn insert_and_reload_round_trips() {
        let conn = open_memory_database().unwrap();
        let appointment = appt("Dr. Orlova", "2026-03-10", "14:30");
        insert_appointment(&conn, &appointment).unwrap();

        let loaded = get_all_appointments(&conn).unwrap();
        assert_eq!(loaded, vec![appointment]);
    }

    #[test]
    fn appointments_ordered_by_date_then_time() {
        let conn = open_memory_database().unwrap();
        insert_appointment(&conn, &appt("C", "2026-03-12", "09:00")).unwrap();
        insert_appointment(&conn, &appt("A", "2026-03-10", "15:00")).unwrap();
        insert_appointment(&conn, &appt("B", "2026-03-10", "09:00")).unwrap();

        let loaded = get_all_appointments(&conn).unwrap();
        let doctors: Vec<_> = loaded.iter().map(|a| a.doctor.as_str()).collect();
        assert_eq!(doctors, vec!["B", "A", "C"]);
    }

    #[test]
    fn delete_by_id_removes_the_right_record() {
        // Deletion is keyed by id, so it stays correct no matter how the
        // list was sorted or filtered in the meantime.
        let conn = open_memory_database().unwrap();
        let first = appt("First", "2026-03-10", "09:00");
        let second = appt("Second", "2026-03-11", "09:00");
        insert_appointment(&conn, &first).unwrap();
        insert_appointment(&conn, &second).unwrap();

        assert_eq!(delete_appointment(&conn, &first.id).unwrap(), 1);
        let remaining = get_all_appointments(&conn).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second.id);
    }

    #[test]
    fn delete_missing_is_noop() {
        let conn = open_memory_database().unwrap();
        assert_eq!(delete_appointment(&conn, &Uuid::new_v4()).unwrap(), 0);
    }
}
