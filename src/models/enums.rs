use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(NotificationKind {
    Tablet => "tablet",
    Injection => "injection",
    Drops => "drops",
});

impl Default for NotificationKind {
    fn default() -> Self {
        Self::Tablet
    }
}

str_enum!(Specialty {
    Therapist => "therapist",
    Pediatrician => "pediatrician",
    Dentist => "dentist",
    Surgeon => "surgeon",
    Cardiologist => "cardiologist",
    Ophthalmologist => "ophthalmologist",
    Neurologist => "neurologist",
    Gynecologist => "gynecologist",
    Urologist => "urologist",
    Endocrinologist => "endocrinologist",
    Rheumatologist => "rheumatologist",
    Psychotherapist => "psychotherapist",
    Dietitian => "dietitian",
    Physiotherapist => "physiotherapist",
    Oncologist => "oncologist",
    Otolaryngologist => "otolaryngologist",
    Allergist => "allergist",
    Pulmonologist => "pulmonologist",
    Gastroenterologist => "gastroenterologist",
    Traumatologist => "traumatologist",
});

impl Specialty {
    /// All selectable specialties, in picker order.
    pub const ALL: [Specialty; 20] = [
        Specialty::Therapist,
        Specialty::Pediatrician,
        Specialty::Dentist,
        Specialty::Surgeon,
        Specialty::Cardiologist,
        Specialty::Ophthalmologist,
        Specialty::Neurologist,
        Specialty::Gynecologist,
        Specialty::Urologist,
        Specialty::Endocrinologist,
        Specialty::Rheumatologist,
        Specialty::Psychotherapist,
        Specialty::Dietitian,
        Specialty::Physiotherapist,
        Specialty::Oncologist,
        Specialty::Otolaryngologist,
        Specialty::Allergist,
        Specialty::Pulmonologist,
        Specialty::Gastroenterologist,
        Specialty::Traumatologist,
    ];
}
