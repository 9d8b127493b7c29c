//! SQLite-backed key-value storage.
//!
//! Every widget namespace maps to one row in the `kv` table holding the whole
//! serialized list. A write replaces the row in a single statement, so readers
//! never observe a partially written list.

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::debug;

use super::data_dir;
use super::record_store::RecordStore;
use crate::error::StorageError;

/// SQLite database holding one blob per namespace.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/devdocket.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("devdocket.db");
        Self::open_at(&path)
    }

    /// Open a database file at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened database");
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl RecordStore for Database {
    fn read_blob(&self, namespace: &str) -> Result<Option<String>, StorageError> {
        Ok(self.kv_get(namespace)?)
    }

    fn write_blob(&self, namespace: &str, blob: &str) -> Result<(), StorageError> {
        Ok(self.kv_set(namespace, blob)?)
    }
}
