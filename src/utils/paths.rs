use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::StorageError;

const APP_DIR_NAME: &str = "com.studyhub";
const DATABASE_FILE_NAME: &str = "studyhub.sqlite";

/// Where the application keeps its files
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Use the platform data directory, e.g. `~/.local/share/com.studyhub`
    pub fn default_location() -> Result<Self, StorageError> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| {
                StorageError::Unavailable("Could not find app data directory".to_string())
            })?
            .join(APP_DIR_NAME);
        Ok(Self { data_dir })
    }

    pub fn at(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    /// Create the data directory if needed
    pub fn ensure_dirs(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            StorageError::Unavailable(format!("Failed to create data directory: {}", e))
        })
    }
}
