mod config;
pub mod database;

pub use config::{BudgetConfig, Config, ContentConfig, NotificationsConfig, TrackerConfig};
pub use database::Database;

use std::path::PathBuf;

use crate::error::DatabaseError;

/// Returns the data directory, creating it if needed.
///
/// `SCROLLDIET_HOME` overrides the location outright. Otherwise this is
/// `~/.config/scrolldiet[-dev]/`, with the `-dev` suffix when
/// `SCROLLDIET_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, DatabaseError> {
    let dir = match std::env::var_os("SCROLLDIET_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("SCROLLDIET_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("scrolldiet-dev")
            } else {
                base_dir.join("scrolldiet")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| DatabaseError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
