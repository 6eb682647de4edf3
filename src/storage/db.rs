//! Database connection management and migrations

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::info;

/// Storage error type
#[derive(Debug)]
pub enum StorageError {
    ConnectionFailed(String),
    MigrationFailed(String),
    QueryFailed(String),
    JsonParseError(String),
    Unavailable(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            StorageError::MigrationFailed(msg) => write!(f, "Migration failed: {}", msg),
            StorageError::QueryFailed(msg) => write!(f, "Query failed: {}", msg),
            StorageError::JsonParseError(msg) => write!(f, "JSON parse error: {}", msg),
            StorageError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::JsonParseError(err.to_string())
    }
}

/// Wrapper around SQLite connection
pub struct Database {
    pub conn: Connection,
    pub path: PathBuf,
}

/// Open or create the key-value database at `path`
pub fn open_database(path: &Path) -> Result<Database, StorageError> {
    info!("Opening database at {:?}", path);

    let conn = Connection::open(path)
        .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

    run_migrations(&conn)?;

    Ok(Database {
        conn,
        path: path.to_path_buf(),
    })
}

/// Open a throwaway in-memory database with the full schema
pub fn open_in_memory() -> Result<Database, StorageError> {
    let conn = Connection::open_in_memory()
        .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

    run_migrations(&conn)?;

    Ok(Database {
        conn,
        path: PathBuf::from(":memory:"),
    })
}

/// Run database schema migrations
fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    // No schema_version table yet means a fresh database
    let current_version: i32 = conn
        .query_row(
            "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    info!("Current schema version: {}", current_version);

    if current_version < 1 {
        info!("Applying migration v1: Initial schema");
        apply_v1_schema(conn)?;
    }

    Ok(())
}

/// Apply the initial v1 schema
fn apply_v1_schema(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(include_str!("schema.sql"))
        .map_err(|e| StorageError::MigrationFailed(format!("Failed to apply v1 schema: {}", e)))?;
    Ok(())
}
