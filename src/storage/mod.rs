//! Storage module for persisted application state
//!
//! This module provides:
//! - SQLite connection management and schema migrations
//! - A key-value repository over the `kv` table
//! - The `KeyValueStore` seam with SQLite and in-memory implementations

pub mod db;
pub mod kv_repo;
pub mod store;

pub use db::{Database, open_database, StorageError};
pub use kv_repo::KvRepo;
pub use store::{KeyValueStore, MemoryStore, SqliteStore, DARK_MODE_KEY, GROUPS_KEY};
