//! SqliteStore: single writer connection, WAL journal, schema migrations.

pub mod migrations;
pub mod pragmas;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{info, warn};

use taxon_core::errors::{StorageError, TaxonResult};
use taxon_core::traits::KeyValueStore;

use crate::to_storage_err;

/// Durable key-value store in one SQLite file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file and bring its schema up to date.
    pub fn open(path: &Path, busy_timeout_ms: u64) -> TaxonResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        pragmas::apply_pragmas(&conn, busy_timeout_ms)?;
        let store = Self::initialize(conn)?;
        let wal = store.wal_enabled()?;
        if !wal {
            warn!(path = %path.display(), "WAL journal not active, writers will block readers");
        }
        info!(path = %path.display(), wal, "sqlite store opened");
        Ok(store)
    }

    /// In-memory database (for testing).
    pub fn open_in_memory() -> TaxonResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> TaxonResult<Self> {
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> TaxonResult<T>
    where
        F: FnOnce(&Connection) -> TaxonResult<T>,
    {
        let guard: MutexGuard<'_, Connection> = self.conn.lock().map_err(|e| {
            StorageError::Unavailable {
                reason: format!("sqlite connection lock poisoned: {e}"),
            }
        })?;
        f(&guard)
    }

    /// Whether the connection runs in WAL journal mode.
    pub fn wal_enabled(&self) -> TaxonResult<bool> {
        self.with_conn(pragmas::verify_wal_mode)
    }

    /// Current schema version recorded by the migration runner.
    pub fn schema_version(&self) -> TaxonResult<u32> {
        self.with_conn(migrations::current_version)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> TaxonResult<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| to_storage_err(e.to_string()))
        })
    }

    fn put(&self, key: &str, value: &str) -> TaxonResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv_entries (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(())
        })
    }

    fn delete(&self, key: &str) -> TaxonResult<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM kv_entries WHERE key = ?1", params![key])
                .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(())
        })
    }

    fn keys(&self, prefix: &str) -> TaxonResult<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT key FROM kv_entries WHERE substr(key, 1, ?2) = ?1 ORDER BY key")
                .map_err(|e| to_storage_err(e.to_string()))?;
            let rows = stmt
                .query_map(params![prefix, prefix.len() as i64], |row| row.get(0))
                .map_err(|e| to_storage_err(e.to_string()))?;
            rows.collect::<Result<Vec<String>, _>>()
                .map_err(|e| to_storage_err(e.to_string()))
        })
    }
}
