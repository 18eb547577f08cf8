//! Integration tests for the dictionary store: concurrency, persistence, idempotence.

use std::sync::Arc;
use std::thread;

use proptest::prelude::*;

use taxon_core::constants::KEY_DICTIONARY;
use taxon_core::errors::{DictionaryError, TaxonError};
use taxon_core::models::{ApplyOutcome, Category, ContextPair, DictionaryUpdate, KeywordTier};
use taxon_core::traits::KeyValueStore;
use taxon_dictionary::{default_taxonomy, DictionaryStore, Taxonomy};
use taxon_storage::InMemoryStore;

fn small_taxonomy() -> Taxonomy {
    Taxonomy::from_categories(vec![
        Category::new("technology", "Technology").with_keywords(KeywordTier::Core, ["software"]),
        Category::new("data", "Data").with_keywords(KeywordTier::Core, ["analytics"]),
    ])
    .unwrap()
}

#[test]
fn concurrent_writers_do_not_lose_or_duplicate_updates() {
    let store = Arc::new(DictionaryStore::new(small_taxonomy()));
    let words: Vec<String> = (0..20).map(|i| format!("term{i}")).collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let words = words.clone();
            thread::spawn(move || {
                let mut applied = 0;
                for w in &words {
                    let update = DictionaryUpdate::keyword(KeywordTier::Support, w.clone());
                    if store.apply_update("technology", &update).unwrap() == ApplyOutcome::Applied {
                        applied += 1;
                    }
                }
                applied
            })
        })
        .collect();

    let total_applied: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total_applied, words.len(), "each word applied exactly once");

    let snapshot = store.snapshot().unwrap();
    assert_eq!(snapshot.category("technology").unwrap().support.len(), words.len());
    assert_eq!(snapshot.version(), 1 + words.len() as u64);
}

#[test]
fn persist_then_load_restores_updates() {
    let kv = InMemoryStore::new();
    let store = DictionaryStore::new(small_taxonomy());
    store
        .apply_update(
            "data",
            &DictionaryUpdate::ContextPair {
                pair: ContextPair::new("data", "visualization"),
            },
        )
        .unwrap();
    store.persist(&kv).unwrap();

    let reloaded = DictionaryStore::load(&kv, default_taxonomy().unwrap()).unwrap();
    let snapshot = reloaded.snapshot().unwrap();
    assert_eq!(snapshot.categories().len(), 2, "persisted dictionary wins over seed");
    assert_eq!(snapshot.category("data").unwrap().context_pairs.len(), 1);
    assert_eq!(
        snapshot.fingerprint().unwrap(),
        store.snapshot().unwrap().fingerprint().unwrap()
    );
}

#[test]
fn fingerprint_tracks_content_changes() {
    let store = DictionaryStore::new(small_taxonomy());
    let before = store.snapshot().unwrap().fingerprint().unwrap();
    let update = DictionaryUpdate::keyword(KeywordTier::Core, "lakehouse");
    store.apply_update("data", &update).unwrap();
    let after = store.snapshot().unwrap().fingerprint().unwrap();
    assert_ne!(before, after);

    store.apply_update("data", &update).unwrap();
    assert_eq!(store.snapshot().unwrap().fingerprint().unwrap(), after);
}

#[test]
fn load_without_persisted_dictionary_uses_seed() {
    let kv = InMemoryStore::new();
    let store = DictionaryStore::load(&kv, default_taxonomy().unwrap()).unwrap();
    assert!(store.snapshot().unwrap().category("leadership").is_some());
}

#[test]
fn corrupt_persisted_dictionary_is_surfaced() {
    let kv = InMemoryStore::new();
    kv.put(KEY_DICTIONARY, "{\"broken\":").unwrap();
    let err = DictionaryStore::load(&kv, small_taxonomy()).err().unwrap();
    assert!(matches!(
        err,
        TaxonError::DictionaryError(DictionaryError::Corrupt { .. })
    ));
}

#[test]
fn replace_bumps_version_and_swaps_content() {
    let store = DictionaryStore::new(small_taxonomy());
    let version = store.replace(default_taxonomy().unwrap()).unwrap();
    assert_eq!(version, 2);
    assert!(store.snapshot().unwrap().category("health").is_some());
}

proptest! {
    #[test]
    fn prop_second_application_is_noop(words in proptest::collection::vec("[a-z]{3,10}", 1..10)) {
        let store = DictionaryStore::new(small_taxonomy());
        for w in &words {
            store.apply_update("data", &DictionaryUpdate::keyword(KeywordTier::Core, w.clone())).unwrap();
        }
        let before = store.snapshot().unwrap();
        for w in &words {
            let outcome = store
                .apply_update("data", &DictionaryUpdate::keyword(KeywordTier::Core, w.clone()))
                .unwrap();
            prop_assert_eq!(outcome, ApplyOutcome::AlreadyPresent);
        }
        let after = store.snapshot().unwrap();
        prop_assert_eq!(before.version(), after.version());
        prop_assert_eq!(before.taxonomy(), after.taxonomy());
    }
}
