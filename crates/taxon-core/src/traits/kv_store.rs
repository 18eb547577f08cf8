use crate::errors::TaxonResult;

/// Durable key-value persistence for histories, audit logs, and the dictionary.
///
/// Values are opaque JSON strings. Implementations must be safe to share
/// across threads; callers treat every write as best-effort.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> TaxonResult<Option<String>>;
    fn put(&self, key: &str, value: &str) -> TaxonResult<()>;
    fn delete(&self, key: &str) -> TaxonResult<()>;
    /// All keys starting with `prefix`, sorted.
    fn keys(&self, prefix: &str) -> TaxonResult<Vec<String>>;
}
