//! DictionaryStore: snapshot reads, single-writer merge updates.
//!
//! Readers clone an `Arc<DictionarySnapshot>` and never block each other or
//! observe a half-applied write. Writers take the writer mutex, copy the
//! current taxonomy, merge, and swap in a new snapshot with a bumped version.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, RwLock};

use tracing::{debug, info, warn};

use taxon_core::constants::KEY_DICTIONARY;
use taxon_core::errors::{DictionaryError, TaxonResult};
use taxon_core::models::{ApplyOutcome, Category, DictionaryUpdate};
use taxon_core::traits::KeyValueStore;

use crate::taxonomy::Taxonomy;

/// Point-in-time, immutable view of the dictionary.
#[derive(Debug)]
pub struct DictionarySnapshot {
    version: u64,
    taxonomy: Taxonomy,
    vocabulary: HashSet<String>,
}

impl DictionarySnapshot {
    fn new(version: u64, taxonomy: Taxonomy) -> Self {
        let vocabulary = taxonomy.vocabulary();
        Self {
            version,
            taxonomy,
            vocabulary,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn categories(&self) -> &[Category] {
        self.taxonomy.categories()
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.taxonomy.get(id)
    }

    /// Words already known to some keyword tier.
    pub fn is_known_word(&self, word: &str) -> bool {
        self.vocabulary.contains(word)
    }

    /// blake3 digest of the category content, stable across a persist
    /// and reload.
    pub fn fingerprint(&self) -> TaxonResult<String> {
        self.taxonomy.fingerprint()
    }

    /// Usable for classification: at least one scoreable category.
    pub fn is_usable(&self) -> bool {
        self.taxonomy.has_scoreable()
    }
}

/// The shared, authoritative category dictionary.
pub struct DictionaryStore {
    current: RwLock<Arc<DictionarySnapshot>>,
    writer: Mutex<()>,
}

impl DictionaryStore {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            current: RwLock::new(Arc::new(DictionarySnapshot::new(1, taxonomy))),
            writer: Mutex::new(()),
        }
    }

    /// Store seeded with the built-in taxonomy.
    pub fn with_seed() -> TaxonResult<Self> {
        Ok(Self::new(crate::seed::default_taxonomy()?))
    }

    /// Load the persisted dictionary, or fall back to `seed` when none exists.
    ///
    /// A persisted payload that cannot be parsed is an error, never silently
    /// replaced: the dictionary is the source of truth.
    pub fn load(kv: &dyn KeyValueStore, seed: Taxonomy) -> TaxonResult<Self> {
        match kv.get(KEY_DICTIONARY)? {
            Some(json) => {
                let taxonomy = Taxonomy::from_json(&json)?;
                let fingerprint = taxonomy.fingerprint()?;
                info!(
                    categories = taxonomy.len(),
                    fingerprint = %fingerprint,
                    "loaded persisted dictionary"
                );
                Ok(Self::new(taxonomy))
            }
            None => {
                info!(categories = seed.len(), "no persisted dictionary, using seed taxonomy");
                Ok(Self::new(seed))
            }
        }
    }

    /// Write the current snapshot to `kv`.
    pub fn persist(&self, kv: &dyn KeyValueStore) -> TaxonResult<()> {
        let snapshot = self.snapshot()?;
        kv.put(KEY_DICTIONARY, &snapshot.taxonomy.to_json()?)?;
        debug!(
            version = snapshot.version,
            fingerprint = %snapshot.fingerprint()?,
            "dictionary persisted"
        );
        Ok(())
    }

    /// Current point-in-time snapshot.
    pub fn snapshot(&self) -> TaxonResult<Arc<DictionarySnapshot>> {
        let guard = self
            .current
            .read()
            .map_err(|_| DictionaryError::LockPoisoned)?;
        Ok(Arc::clone(&guard))
    }

    pub fn version(&self) -> TaxonResult<u64> {
        Ok(self.snapshot()?.version)
    }

    /// Merge one update into a category. Idempotent: an update that is
    /// already present returns [`ApplyOutcome::AlreadyPresent`] and leaves
    /// the version unchanged.
    pub fn apply_update(&self, category_id: &str, update: &DictionaryUpdate) -> TaxonResult<ApplyOutcome> {
        let _writer = self.writer.lock().map_err(|_| DictionaryError::LockPoisoned)?;
        let current = self.snapshot()?;
        if current.taxonomy.contains_update(category_id, update)? {
            debug!(category = category_id, update = %update.describe(), "update already present");
            return Ok(ApplyOutcome::AlreadyPresent);
        }

        let mut taxonomy = current.taxonomy.clone();
        if !taxonomy.merge(category_id, update)? {
            return Ok(ApplyOutcome::AlreadyPresent);
        }
        let next = Arc::new(DictionarySnapshot::new(current.version + 1, taxonomy));
        let version = next.version;
        self.swap(next)?;
        info!(
            category = category_id,
            update = %update.describe(),
            version,
            "dictionary updated"
        );
        Ok(ApplyOutcome::Applied)
    }

    /// Replace the whole taxonomy (e.g. an operator reload).
    pub fn replace(&self, taxonomy: Taxonomy) -> TaxonResult<u64> {
        let _writer = self.writer.lock().map_err(|_| DictionaryError::LockPoisoned)?;
        if !taxonomy.has_scoreable() {
            warn!("replacing dictionary with a taxonomy that has no scoreable categories");
        }
        let version = self.snapshot()?.version + 1;
        self.swap(Arc::new(DictionarySnapshot::new(version, taxonomy)))?;
        Ok(version)
    }

    fn swap(&self, next: Arc<DictionarySnapshot>) -> TaxonResult<()> {
        let mut guard = self
            .current
            .write()
            .map_err(|_| DictionaryError::LockPoisoned)?;
        *guard = next;
        Ok(())
    }
}
