use rusqlite::{params, Connection};

use crate::db::DatabaseError;

/// User-added categories, oldest first. The default list never appears here.
pub fn get_custom_categories(conn: &Connection) -> Result<Vec<String>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT name FROM custom_categories ORDER BY added_at ASC, name ASC")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}

/// Adds a custom category (idempotent).
pub fn add_custom_category(conn: &Connection, name: &str) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT OR IGNORE INTO custom_categories (name) VALUES (?1)",
        params![name],
    )?;
    Ok(())
}

/// Removes a custom category. Returns the number of rows removed (0 or 1).
pub fn remove_custom_category(conn: &Connection, name: &str) -> Result<usize, DatabaseError> {
    let removed = conn.execute(
        "DELETE FROM custom_categories WHERE name = ?1",
        params![name],
    )?;
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    #[test]
    fn add_is_idempotent() {
        let conn = open_memory_database().unwrap();
        add_custom_category(&conn, "Homeopathy").unwrap();
        add_custom_category(&conn, "Homeopathy").unwrap();

        assert_eq!(get_custom_categories(&conn).unwrap(), vec!["Homeopathy"]);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let conn = open_memory_database().unwrap();
        assert_eq!(remove_custom_category(&conn, "Nope").unwrap(), 0);
    }

    #[test]
    fn remove_deletes_entry() {
        let conn = open_memory_database().unwrap();
        add_custom_category(&conn, "Travel kit").unwrap();
        assert_eq!(remove_custom_category(&conn, "Travel kit").unwrap(), 1);
        assert!(get_custom_categories(&conn).unwrap().is_empty());
    }
}
