//! Ordered schema migrations, tracked in `schema_version`.

mod v001_kv_entries;

use rusqlite::{params, Connection};
use tracing::debug;

use taxon_core::errors::{StorageError, TaxonResult};

use crate::to_storage_err;

type Migration = fn(&Connection) -> TaxonResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[(1, v001_kv_entries::migrate)];

pub const LATEST_VERSION: u32 = 1;

/// Apply every migration newer than the recorded version.
pub fn run_migrations(conn: &Connection) -> TaxonResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    for (version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        migrate(conn).map_err(|e| StorageError::MigrationFailed {
            version: *version,
            reason: e.to_string(),
        })?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        debug!(version, "migration applied");
    }
    Ok(())
}

pub fn current_version(conn: &Connection) -> TaxonResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
