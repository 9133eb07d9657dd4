mod config;
pub mod database;
pub mod memory;

pub use config::{Config, NoticesConfig, PeersConfig, StorageConfig};
pub use database::SqliteStorage;
pub use memory::MemoryStorage;

use std::path::PathBuf;

use crate::error::StorageError;

/// Default key the engagement log is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "learning_engagement_data";

/// Key-value persistence for the serialized engagement log.
///
/// Implementations report failures; deciding what a failure means is the
/// store's job.
pub trait LogStorage {
    /// Read the value stored under `key`, `None` if it was never written.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: LogStorage + ?Sized> LogStorage for Box<T> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

/// Returns the data directory, creating it if needed.
///
/// `CONTINUITY_HOME` overrides the location outright. Otherwise this is
/// `~/.config/continuity[-dev]/`, with `CONTINUITY_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("CONTINUITY_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("CONTINUITY_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("continuity-dev")
            } else {
                base_dir.join("continuity")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(StorageError::DataDir)?;
    Ok(dir)
}
