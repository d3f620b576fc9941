//! Durable Key-Value Store
//!
//! The persistence boundary of the engine: whole-value string blobs
//! under fixed collection keys. `DurableStore` is the contract the host
//! app can satisfy with its own storage; `SqliteStore` is the shipped
//! implementation backed by a pooled SQLite database.

use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{database_path, ensure_skyforge_dir};

/// Store contract: get/set/remove whole values by key.
///
/// Writes replace the entire value; there are no partial updates. A
/// failed write leaves the previous value in place (single
/// try-again-wholesale semantics).
pub trait DurableStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// SQLite-backed durable store with connection pooling
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Open (or create) a store at the given path
    pub fn open(path: &Path) -> AppResult<Self> {
        let manager = SqliteConnectionManager::file(path);
        Self::from_manager(manager, 10)
    }

    /// Open the store at the default location (~/.skyforge/data.db)
    pub fn open_default() -> AppResult<Self> {
        ensure_skyforge_dir()?;
        let path = database_path()?;
        Self::open(&path)
    }

    /// Open an in-memory store.
    ///
    /// Pool size is pinned to 1: each in-memory SQLite connection is its
    /// own database, so a larger pool would fracture the data.
    pub fn open_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        Self::from_manager(manager, 1)
    }

    fn from_manager(manager: SqliteConnectionManager, max_size: u32) -> AppResult<Self> {
        let pool = Pool::builder().max_size(max_size).build(manager)?;
        let store = Self { pool };
        store.init_schema()?;
        Ok(store)
    }

    /// Get a pooled connection
    fn connection(&self) -> AppResult<PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| AppError::storage(format!("Failed to get connection: {e}")))
    }

    fn init_schema(&self) -> AppResult<()> {
        let conn = self.connection()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS collections (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );",
        )?;
        Ok(())
    }
}

impl DurableStore for SqliteStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let conn = self.connection()?;
        let result = conn.query_row(
            "SELECT value FROM collections WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO collections (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let conn = self.connection()?;
        conn.execute("DELETE FROM collections WHERE key = ?1", params![key])?;
        Ok(())
    }
}
