use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::Profile;

const KEY_FIRST_NAME: &str = "first_name";
const KEY_LAST_NAME: &str = "last_name";
const KEY_BIRTH_DATE: &str = "birth_date";
const KEY_AVATAR_URI: &str = "avatar_uri";

/// Get a profile field by key. Returns None if not set.
pub fn get_field(conn: &Connection, key: &str) -> Result<Option<String>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT value FROM profile_fields WHERE key = ?1")?;
    match stmt.query_row([key], |row| row.get::<_, String>(0)) {
        Ok(val) => Ok(Some(val)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::from(e)),
    }
}

/// Set a profile field (upsert).
pub fn set_field(conn: &Connection, key: &str, value: &str) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO profile_fields (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

/// Delete a profile field.
pub fn delete_field(conn: &Connection, key: &str) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM profile_fields WHERE key = ?1", [key])?;
    Ok(())
}

/// Loads the whole profile; unset fields come back empty.
pub fn load_profile(conn: &Connection) -> Result<Profile, DatabaseError> {
    Ok(Profile {
        first_name: get_field(conn, KEY_FIRST_NAME)?.unwrap_or_default(),
        last_name: get_field(conn, KEY_LAST_NAME)?.unwrap_or_default(),
        birth_date: get_field(conn, KEY_BIRTH_DATE)?.unwrap_or_default(),
        avatar_uri: get_field(conn, KEY_AVATAR_URI)?,
    })
}

/// Saves the whole profile. A removed avatar clears its stored field.
pub fn save_profile(conn: &Connection, profile: &Profile) -> Result<(), DatabaseError> {
    set_field(conn, KEY_FIRST_NAME, &profile.first_name)?;
    set_field(conn, KEY_LAST_NAME, &profile.last_name)?;
    set_field(conn, KEY_BIRTH_DATE, &profile.birth_date)?;
    match &profile.avatar_uri {
        Some(uri) => set_field(conn, KEY_AVATAR_URI, uri)?,
        None => delete_field(conn, KEY_AVATAR_URI)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    #[test]
    fn empty_profile_loads_with_defaults() {
        let conn = open_memory_database().unwrap();
        assert_eq!(load_profile(&conn).unwrap(), Profile::default());
    }

    #[test]
    fn save_and_load_round_trips() {
        let conn = open_memory_database().unwrap();
        let profile = Profile {
            first_name: "Anna".into(),
            last_name: "Sokolova".into(),
            birth_date: "14.06.1991".into(),
            avatar_uri: Some("file:///photos/avatar.jpg".into()),
        };
        save_profile(&conn, &profile).unwrap();
        assert_eq!(load_profile(&conn).unwrap(), profile);
    }

    #[test]
    fn saving_again_overwrites() {
        let conn = open_memory_database().unwrap();
        let mut profile = Profile {
            first_name: "Anna".into(),
            ..Profile::default()
        };
        save_profile(&conn, &profile).unwrap();

        profile.first_name = "Anya".into();
        save_profile(&conn, &profile).unwrap();
        assert_eq!(load_profile(&conn).unwrap().first_name, "Anya");
    }

    #[test]
    fn clearing_avatar_removes_stored_field() {
        let conn = open_memory_database().unwrap();
        let mut profile = Profile {
            avatar_uri: Some("file:///photos/avatar.jpg".into()),
            ..Profile::default()
        };
        save_profile(&conn, &profile).unwrap();

        profile.avatar_uri = None;
        save_profile(&conn, &profile).unwrap();
        assert_eq!(get_field(&conn, KEY_AVATAR_URI).unwrap(), None);
    }
}
