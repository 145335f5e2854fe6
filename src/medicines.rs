//! Medicine cabinet — inventory CRUD, favorites, and the category list.
//!
//! Categories come from two places: a fixed default list and user-added
//! custom entries. Only the custom entries are persisted; the merged view is
//! computed at read time.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::db::repository::{
    add_custom_category, count_by_category, delete_medicine as delete_medicine_row,
    get_all_medicines, get_custom_categories, get_medicine, get_medicines_by_category,
    insert_medicine, remove_custom_category, toggle_favorite as toggle_favorite_row,
    update_medicine,
};
use crate::db::DatabaseError;
use crate::models::Medicine;

/// Built-in categories, in picker order. User additions are merged after.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Pain relief",
    "Antibiotics",
    "Antivirals",
    "Antihistamines",
    "Anti-inflammatory",
    "Vitamins",
    "Supplements",
    "Gastrointestinal",
    "Cardiovascular",
    "Hormonal",
    "Antidepressants",
    "Dressings",
    "Other",
];

#[derive(Error, Debug)]
pub enum MedicineError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Medicine form contents. Quantity arrives as the raw form string so the
/// "required" and "whole number" checks live in one place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedicineInput {
    pub name: String,
    pub quantity: String,
    pub dosage: String,
    pub expiration_date: String,
    pub category: String,
    pub is_favorite: bool,
    pub image_uri: Option<String>,
}

/// Validates the form and inserts a new medicine, or updates the one with
/// `existing_id`. Validation failures leave storage unchanged.
pub fn save_medicine(
    conn: &Connection,
    input: &MedicineInput,
    existing_id: Option<Uuid>,
    now: NaiveDateTime,
) -> Result<Medicine, MedicineError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(MedicineError::Validation("Medicine name is required".into()));
    }
    let quantity_raw = input.quantity.trim();
    if quantity_raw.is_empty() {
        return Err(MedicineError::Validation("Quantity is required".into()));
    }
    let quantity: u32 = quantity_raw
        .parse()
        .map_err(|_| MedicineError::Validation("Quantity must be a whole number".into()))?;
    if input.category.trim().is_empty() {
        return Err(MedicineError::Validation("Category is required".into()));
    }

    let medicine = match existing_id {
        Some(id) => {
            let existing = get_medicine(conn, &id)?.ok_or(DatabaseError::NotFound {
                entity_type: "Medicine".into(),
                id: id.to_string(),
            })?;
            let medicine = Medicine {
                id,
                name: name.to_string(),
                quantity,
                dosage: input.dosage.trim().to_string(),
                expiration_date: input.expiration_date.clone(),
                category: input.category.trim().to_string(),
                is_favorite: input.is_favorite,
                image_uri: input.image_uri.clone(),
                created_at: existing.created_at,
            };
            update_medicine(conn, &medicine)?;
            medicine
        }
        None => {
            let medicine = Medicine {
                id: Uuid::new_v4(),
                name: name.to_string(),
                quantity,
                dosage: input.dosage.trim().to_string(),
                expiration_date: input.expiration_date.clone(),
                category: input.category.trim().to_string(),
                is_favorite: input.is_favorite,
                image_uri: input.image_uri.clone(),
                created_at: now,
            };
            insert_medicine(conn, &medicine)?;
            medicine
        }
    };

    tracing::info!(medicine_id = %medicine.id, name = %medicine.name, "Medicine saved");
    Ok(medicine)
}

/// Medicines in a category, or the whole cabinet when `category` is `None`.
pub fn medicines_in_category(
    conn: &Connection,
    category: Option<&str>,
) -> Result<Vec<Medicine>, MedicineError> {
    let medicines = match category {
        Some(category) => get_medicines_by_category(conn, category)?,
        None => get_all_medicines(conn)?,
    };
    Ok(medicines)
}

/// Flips the favorite flag. Toggling twice restores the original value.
pub fn toggle_favorite(conn: &Connection, id: &Uuid) -> Result<(), MedicineError> {
    if toggle_favorite_row(conn, id)? == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Medicine".into(),
            id: id.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Deletes a medicine by id; deleting an absent id is a no-op.
pub fn delete_medicine(conn: &Connection, id: &Uuid) -> Result<(), MedicineError> {
    let removed = delete_medicine_row(conn, id)?;
    if removed > 0 {
        tracing::info!(medicine_id = %id, "Medicine deleted");
    }
    Ok(())
}

/// Medicines per category (categories with no medicines are absent).
pub fn category_counts(conn: &Connection) -> Result<HashMap<String, i64>, MedicineError> {
    Ok(count_by_category(conn)?)
}

/// The category picker list: defaults first, then custom additions,
/// duplicates dropped while preserving order.
pub fn merged_categories(conn: &Connection) -> Result<Vec<String>, MedicineError> {
    let mut merged: Vec<String> = DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect();
    for custom in get_custom_categories(conn)? {
        if !merged.contains(&custom) {
            merged.push(custom);
        }
    }
    Ok(merged)
}

/// Adds a user category. Names already covered by the defaults are accepted
/// but never duplicated in the merged view.
pub fn add_category(conn: &Connection, name: &str) -> Result<(), MedicineError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(MedicineError::Validation("Category name is required".into()));
    }
    add_custom_category(conn, name)?;
    Ok(())
}

/// Removes a user category. Defaults cannot be removed.
pub fn remove_category(conn: &Connection, name: &str) -> Result<(), MedicineError> {
    remove_custom_category(conn, name)?;
    Ok(())
}

static NON_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\D").unwrap());

/// Formats free keystrokes into the DD.MM.YYYY expiration display mask:
/// strips non-digits, inserts the dots, truncates to ten characters.
pub fn normalize_expiration_input(raw: &str) -> String {
    let digits = NON_DIGITS.replace_all(raw, "");
    let mut formatted = String::new();
    for (i, c) in digits.chars().take(8).enumerate() {
        if i == 2 || i == 4 {
            formatted.push('.');
        }
        formatted.push(c);
    }
    formatted
}
