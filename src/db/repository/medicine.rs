use std::collections::HashMap;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::Medicine;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn insert_medicine(conn: &Connection, med: &Medicine) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO medicines (id, name, quantity, dosage, expiration_date, category,
         is_favorite, image_uri, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            med.id.to_string(),
            med.name,
            med.quantity,
            med.dosage,
            med.expiration_date,
            med.category,
            med.is_favorite as i32,
            med.image_uri,
            med.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn update_medicine(conn: &Connection, med: &Medicine) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE medicines SET name = ?2, quantity = ?3, dosage = ?4, expiration_date = ?5,
         category = ?6, is_favorite = ?7, image_uri = ?8
         WHERE id = ?1",
        params![
            med.id.to_string(),
            med.name,
            med.quantity,
            med.dosage,
            med.expiration_date,
            med.category,
            med.is_favorite as i32,
            med.image_uri,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Medicine".into(),
            id: med.id.to_string(),
        });
    }
    Ok(())
}

pub fn get_medicine(conn: &Connection, id: &Uuid) -> Result<Option<Medicine>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, quantity, dosage, expiration_date, category, is_favorite,
         image_uri, created_at
         FROM medicines WHERE id = ?1",
    )?;

    match stmt.query_row(params![id.to_string()], medicine_row) {
        Ok(row) => Ok(Some(medicine_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::from(e)),
    }
}

/// All medicines in cabinet (insertion order).
pub fn get_all_medicines(conn: &Connection) -> Result<Vec<Medicine>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, quantity, dosage, expiration_date, category, is_favorite,
         image_uri, created_at
         FROM medicines ORDER BY created_at ASC, name ASC",
    )?;

    let rows = stmt.query_map([], medicine_row)?;

    let mut meds = Vec::new();
    for row in rows {
        meds.push(medicine_from_row(row?)?);
    }
    Ok(meds)
}

pub fn get_medicines_by_category(
    conn: &Connection,
    category: &str,
) -> Result<Vec<Medicine>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, quantity, dosage, expiration_date, category, is_favorite,
         image_uri, created_at
         FROM medicines WHERE category = ?1 ORDER BY created_at ASC, name ASC",
    )?;

    let rows = stmt.query_map(params![category], medicine_row)?;

    let mut meds = Vec::new();
    for row in rows {
        meds.push(medicine_from_row(row?)?);
    }
    Ok(meds)
}

/// Flips is_favorite in place. Returns the number of rows touched (0 or 1).
pub fn toggle_favorite(conn: &Connection, id: &Uuid) -> Result<usize, DatabaseError> {
    let changed = conn.execute(
        "UPDATE medicines SET is_favorite = 1 - is_favorite WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(changed)
}

/// Deletes a medicine by id. Returns the number of rows removed (0 or 1).
pub fn delete_medicine(conn: &Connection, id: &Uuid) -> Result<usize, DatabaseError> {
    let removed = conn.execute(
        "DELETE FROM medicines WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(removed)
}

/// Medicines per category, for the dashboard tiles.
pub fn count_by_category(conn: &Connection) -> Result<HashMap<String, i64>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT category, COUNT(*) FROM medicines GROUP BY category")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut counts = HashMap::new();
    for row in rows {
        let (category, count) = row?;
        counts.insert(category, count);
    }
    Ok(counts)
}

// Internal row type for Medicine mapping
struct MedicineRow {
    id: String,
    name: String,
    quantity: u32,
    dosage: String,
    expiration_date: String,
    category: String,
    is_favorite: i32,
    image_uri: Option<String>,
    created_at: String,
}

fn medicine_row(row: &rusqlite::Row<'_>) -> Result<MedicineRow, rusqlite::Error> {
    Ok(MedicineRow {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
        dosage: row.get(3)?,
        expiration_date: row.get(4)?,
        category: row.get(5)?,
        is_favorite: row.get(6)?,
        image_uri: row.get(7)?,
        created_at: row.get(8)?,
    })
}

fn medicine_from_row(row: MedicineRow) -> Result<Medicine, DatabaseError> {
    Ok(Medicine {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        name: row.name,
        quantity: row.quantity,
        dosage: row.dosage,
        expiration_date: row.expiration_date,
        category: row.category,
        is_favorite: row.is_favorite != 0,
        image_uri: row.image_uri,
        created_at: NaiveDateTime::parse_from_str(&row.created_at, TIMESTAMP_FORMAT)
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn sample(name: &str, category: &str) -> Medicine {
        Medicine {
            id: Uuid::new_v4(),
            name: name.into(),
            quantity: 20,
            dosage: "500 mg".into(),
            expiration_date: "12.08.2027".into(),
            category: category.into(),
            is_favorite: false,
            image_uri: None,
            created_at: NaiveDateTime::parse_from_str("2026-02-01 09:00:00", TIMESTAMP_FORMAT)
                .unwrap(),
        }
    }

    #[test]
    fn insert_and_reload_round_trips() {
        let conn = open_memory_database().unwrap();
        let med = sample("Paracetamol", "Pain relief");
        insert_medicine(&conn, &med).unwrap();

        let loaded = get_medicine(&conn, &med.id).unwrap().unwrap();
        assert_eq!(loaded, med);
    }

    #[test]
    fn get_missing_medicine_returns_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_medicine(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn update_replaces_fields_but_keeps_created_at() {
        let conn = open_memory_database().unwrap();
        let mut med = sample("Ibuprofen", "Pain relief");
        insert_medicine(&conn, &med).unwrap();

        med.quantity = 5;
        med.category = "Anti-inflammatory".into();
        update_medicine(&conn, &med).unwrap();

        let loaded = get_medicine(&conn, &med.id).unwrap().unwrap();
        assert_eq!(loaded.quantity, 5);
        assert_eq!(loaded.category, "Anti-inflammatory");
        assert_eq!(loaded.created_at, med.created_at);
    }

    #[test]
    fn update_missing_medicine_is_not_found() {
        let conn = open_memory_database().unwrap();
        let med = sample("Ghost", "Other");
        let err = update_medicine(&conn, &med).unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[test]
    fn toggle_favorite_twice_restores_original() {
        let conn = open_memory_database().unwrap();
        let med = sample("Paracetamol", "Pain relief");
        insert_medicine(&conn, &med).unwrap();

        assert_eq!(toggle_favorite(&conn, &med.id).unwrap(), 1);
        assert!(get_medicine(&conn, &med.id).unwrap().unwrap().is_favorite);

        assert_eq!(toggle_favorite(&conn, &med.id).unwrap(), 1);
        assert!(!get_medicine(&conn, &med.id).unwrap().unwrap().is_favorite);
    }

    #[test]
    fn delete_removes_exactly_one() {
        let conn = open_memory_database().unwrap();
        let keep = sample("Keep", "Other");
        let gone = sample("Gone", "Other");
        insert_medicine(&conn, &keep).unwrap();
        insert_medicine(&conn, &gone).unwrap();

        assert_eq!(delete_medicine(&conn, &gone.id).unwrap(), 1);
        assert_eq!(delete_medicine(&conn, &gone.id).unwrap(), 0);
        assert_eq!(get_all_medicines(&conn).unwrap().len(), 1);
    }

    #[test]
    fn category_filter_and_counts() {
        let conn = open_memory_database().unwrap();
        insert_medicine(&conn, &sample("Paracetamol", "Pain relief")).unwrap();
        insert_medicine(&conn, &sample("Ibuprofen", "Pain relief")).unwrap();
        insert_medicine(&conn, &sample("Vitamin D", "Vitamins")).unwrap();

        let pain = get_medicines_by_category(&conn, "Pain relief").unwrap();
        assert_eq!(pain.len(), 2);

        let counts = count_by_category(&conn).unwrap();
        assert_eq!(counts["Pain relief"], 2);
        assert_eq!(counts["Vitamins"], 1);
    }
}
