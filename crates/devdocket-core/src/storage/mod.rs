mod config;
pub mod database;
pub mod record_store;

pub use config::{Config, JournalConfig, Persistence, StorageConfig, TimerConfig, UiConfig};
pub use database::Database;
pub use record_store::{load_records, save_records, MemoryStore, RecordStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the DevDocket data directory, creating it if needed.
///
/// `DEVDOCKET_HOME` wins when set. Otherwise `~/.config/devdocket`, or
/// `~/.config/devdocket-dev` when `DEVDOCKET_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("DEVDOCKET_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("DEVDOCKET_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("devdocket-dev")
            } else {
                base_dir.join("devdocket")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
