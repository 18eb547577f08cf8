//! PRAGMA configuration applied to file-backed connections.

use rusqlite::Connection;

use taxon_core::errors::TaxonResult;

use crate::to_storage_err;

/// WAL journal, NORMAL sync, configurable busy timeout.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u64) -> TaxonResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = {busy_timeout_ms};
        "
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> TaxonResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
