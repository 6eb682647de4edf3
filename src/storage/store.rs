//! Durable key-value store abstraction
//!
//! Everything the application persists goes through [`KeyValueStore`]: two
//! string keys, each holding a JSON document that is rewritten wholesale.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use super::db::{open_database, open_in_memory, Database};
use super::kv_repo::KvRepo;
use super::StorageError;

/// Storage key for the serialized group collection
pub const GROUPS_KEY: &str = "studyGroups";

/// Storage key for the serialized dark-mode flag
pub const DARK_MODE_KEY: &str = "rv_hub_dark_mode";

/// String-keyed persistent storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Whether writes survive a restart
    fn is_durable(&self) -> bool {
        true
    }
}

/// SQLite-backed store
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self { db: open_database(path)? })
    }

    pub fn in_memory() -> Result<Self, StorageError> {
        Ok(Self { db: open_in_memory()? })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        KvRepo::new(&self.db.conn).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        debug!("Writing {} bytes to {}", value.len(), key);
        KvRepo::new(&self.db.conn).set(key, value)
    }
}

/// Process-local store, used when nothing durable is available
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }
}
