pub mod appointment;
pub mod enums;
pub mod medicine;
pub mod notification_log;
pub mod profile;
pub mod reminder;

pub use appointment::*;
pub use medicine::*;
pub use notification_log::*;
pub use profile::*;
pub use reminder::*;
