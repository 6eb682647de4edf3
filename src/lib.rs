pub mod models;
pub mod commands;
pub mod services;
pub mod storage;
pub mod utils;

use std::rc::Rc;
use tracing::{info, warn};

use services::{GroupStore, ThemePreference};
use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};
use utils::paths::AppConfig;

/// Application state handed to the presentation layer
pub struct AppState {
    pub groups: GroupStore,
    pub theme: ThemePreference,
}

impl AppState {
    /// Open the SQLite store under `config`, or run in memory if it can't be
    /// opened
    pub fn open(config: &AppConfig) -> Self {
        match open_store(config) {
            Ok(store) => {
                info!("Using storage at {:?}", store.database().path);
                Self::with_store(Rc::new(store))
            }
            Err(e) => {
                warn!("Storage unavailable, changes will not be saved: {}", e);
                Self::with_store(Rc::new(MemoryStore::new()))
            }
        }
    }

    /// Load all state from `store`
    pub fn with_store(store: Rc<dyn KeyValueStore>) -> Self {
        Self {
            groups: GroupStore::load(store.clone()),
            theme: ThemePreference::load(store),
        }
    }
}

fn open_store(config: &AppConfig) -> Result<SqliteStore, StorageError> {
    config.ensure_dirs()?;
    SqliteStore::open(&config.database_path())
}
