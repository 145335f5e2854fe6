//! Pillbox core — domain logic and persistence for a local-first home
//! medicine cabinet.
//!
//! The host shell (mobile or desktop UI) renders screens and owns device
//! capabilities; everything stateful lives here:
//!
//! - `medicines` — inventory CRUD, favorites, categories
//! - `reminders` — dose reminders mapped onto OS notification triggers
//! - `notifications` — delivered/tapped notification history
//! - `appointments` — doctor appointment bookings
//! - `receipt` / `pharmacy` — receipt OCR and nearby-pharmacy lookup clients
//! - `db` — SQLite-backed repositories, one table per entity
//!
//! The shell supplies two things: a [`scheduler::NotificationScheduler`]
//! implementation over the platform notification API, and forwarding of
//! delivery/tap callbacks into [`notifications::record_event`].

pub mod appointments;
pub mod config;
pub mod db;
pub mod medicines;
pub mod models;
pub mod notifications;
pub mod pharmacy;
pub mod receipt;
pub mod reminders;
pub mod scheduler;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process. Respects `RUST_LOG` when set.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
