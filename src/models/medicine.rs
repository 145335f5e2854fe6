use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: Uuid,
    pub name: String,
    pub quantity: u32,
    pub dosage: String,
    /// Free text in the display format DD.MM.YYYY (see `normalize_expiration_input`).
    pub expiration_date: String,
    pub category: String,
    pub is_favorite: bool,
    /// Local file URI of the package photo, if one was attached.
    pub image_uri: Option<String>,
    pub created_at: NaiveDateTime,
}
