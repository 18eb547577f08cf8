//! # taxon-storage
//!
//! Implementations of [`taxon_core::traits::KeyValueStore`] and the
//! [`PersistenceQueue`] that makes every write best-effort: failed writes
//! stay queued and are retried on the next flush.

pub mod memory;
pub mod queue;
pub mod sqlite;

pub use memory::InMemoryStore;
pub use queue::{spawn_flush_loop, FlushReport, PersistenceQueue};
pub use sqlite::SqliteStore;

use taxon_core::errors::{StorageError, TaxonError};

/// Wrap a lower-level failure message as a storage error.
pub(crate) fn to_storage_err(message: impl Into<String>) -> TaxonError {
    StorageError::SqliteError {
        message: message.into(),
    }
    .into()
}
