use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Pillbox";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the application data directory
/// ~/Pillbox/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Pillbox")
}

/// Get the database file path
pub fn database_path() -> PathBuf {
    app_data_dir().join("pillbox.db")
}

/// Get the directory for medicine and avatar photos
pub fn images_dir() -> PathBuf {
    app_data_dir().join("images")
}

/// Default tracing filter when RUST_LOG is not set
pub fn default_log_filter() -> &'static str {
    "pillbox=info"
}
