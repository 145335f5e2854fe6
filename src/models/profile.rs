use serde::{Deserialize, Serialize};

/// Flat user profile. All fields optional in practice; absent values read
/// back as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    /// Free text, user-formatted.
    pub birth_date: String,
    /// Local file URI of the avatar photo.
    pub avatar_uri: Option<String>,
}
