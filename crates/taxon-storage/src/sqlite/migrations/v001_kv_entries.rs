//! v001: kv_entries.

use rusqlite::Connection;

use taxon_core::errors::TaxonResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> TaxonResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS kv_entries (
            key        TEXT PRIMARY KEY,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
