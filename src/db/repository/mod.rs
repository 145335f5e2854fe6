//! Repository layer — entity-scoped database operations.
//!
//! Typed accessors per entity; every mutation is a single SQL statement so
//! concurrent writers cannot lose each other's updates. No business rules
//! live here.

mod appointment;
mod category;
mod medicine;
mod notification_log;
mod profile;
mod reminder;

// Re-export all public items from sub-modules
pub use appointment::*;
pub use category::*;
pub use medicine::*;
pub use notification_log::*;
pub use profile::*;
pub use reminder::*;
