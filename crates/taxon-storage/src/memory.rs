//! Process-local store, used in tests and when durability is not needed.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use taxon_core::errors::{StorageError, TaxonResult};
use taxon_core::traits::KeyValueStore;

/// `BTreeMap`-backed store. Can be switched into a failing mode to
/// exercise the retry path.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StorageError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> TaxonResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable {
                reason: "in-memory store marked unavailable".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn lock(&self) -> TaxonResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries.lock().map_err(|e| {
            StorageError::Unavailable {
                reason: format!("in-memory store lock poisoned: {e}"),
            }
            .into()
        })
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> TaxonResult<Option<String>> {
        self.check_available()?;
        Ok(self.lock()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> TaxonResult<()> {
        self.check_available()?;
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> TaxonResult<()> {
        self.check_available()?;
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self, prefix: &str) -> TaxonResult<Vec<String>> {
        self.check_available()?;
        Ok(self
            .lock()?
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_delete() {
        let store = InMemoryStore::new();
        store.put("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.delete("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn unavailable_mode_fails_calls() {
        let store = InMemoryStore::new();
        store.set_unavailable(true);
        assert!(store.put("a", "1").is_err());
        store.set_unavailable(false);
        assert!(store.put("a", "1").is_ok());
    }
}
