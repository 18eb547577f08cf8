//! Runtime wiring: classification sees what learning applies, state
//! survives a reopen, and file overrides replace the built-in data.

use std::sync::Arc;
use std::time::Duration;

use taxon::models::{ClassificationSource, FeedbackRecord, JobPosting};
use taxon::{RecoveryStatus, RuntimeOptions, TaxonConfig, TaxonError, TaxonRuntime};
use taxon_core::constants::KEY_FEEDBACK_HISTORY;
use taxon_core::traits::KeyValueStore;
use taxon_storage::InMemoryStore;

fn rt() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap()
}

fn specialist(n: usize) -> JobPosting {
    JobPosting::new(format!("job-{n}"), "Blockchain Specialist")
}

/// Classify, then correct to technology, `count` times.
fn teach(runtime: &TaxonRuntime, count: usize) {
    for n in 0..count {
        let job = specialist(n);
        let result = runtime.classify(&job).unwrap();
        let record = FeedbackRecord::correct(&job, &result, "technology");
        runtime.process_feedback(record).unwrap();
    }
}

// ── Feedback loop ──

#[test]
fn learned_keyword_changes_next_classification() {
    let runtime = TaxonRuntime::open(RuntimeOptions::in_memory()).unwrap();

    let before = runtime.classify(&specialist(100)).unwrap();
    assert_eq!(before.source, ClassificationSource::NoEvidence);
    assert_eq!(before.primary, "general");

    teach(&runtime, 8);

    let after = runtime.classify(&specialist(101)).unwrap();
    assert_eq!(after.primary, "technology");
    assert_eq!(after.source, ClassificationSource::Scored);
    assert!(after.dictionary_version > before.dictionary_version);
    assert!(after.reasoning.iter().any(|r| r.contains("blockchain")));

    let insights = runtime.learning_insights(10);
    assert_eq!(insights.total_feedback, 8);
    assert_eq!(insights.overall_accuracy, 0.0);
}

#[test]
fn limits_are_capped() {
    let runtime = TaxonRuntime::open(RuntimeOptions::in_memory()).unwrap();
    runtime.classify(&specialist(1)).unwrap();
    assert_eq!(runtime.recent_results(usize::MAX).len(), 1);
    assert!(runtime.pending_proposals(usize::MAX).is_empty());
}

// ── Persistence ──

#[test]
fn reopened_runtime_keeps_learned_state() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("state").join("taxon.db");
    let options = RuntimeOptions {
        db_path: Some(db_path.clone()),
        ..RuntimeOptions::default()
    };

    {
        let runtime = TaxonRuntime::open(options.clone()).unwrap();
        teach(&runtime, 8);
        assert!(runtime.shutdown().is_clean());
    }

    let runtime = TaxonRuntime::open(options).unwrap();
    assert!(db_path.exists());
    assert_eq!(runtime.learning().feedback_history(100).len(), 8);
    assert!(runtime
        .dictionary()
        .snapshot()
        .unwrap()
        .category("technology")
        .unwrap()
        .core
        .contains("blockchain"));
    assert_eq!(runtime.classify(&specialist(200)).unwrap().primary, "technology");
    assert!(runtime.degradations().is_empty());
}

#[test]
fn background_flush_writes_pending_state() {
    let mut config = TaxonConfig::default();
    config.storage.flush_interval_secs = 1;
    let runtime = TaxonRuntime::open(RuntimeOptions {
        config,
        ..RuntimeOptions::default()
    })
    .unwrap();

    rt().block_on(async {
        let handle = runtime.spawn_flush_loop();
        teach(&runtime, 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;
        handle.abort();
    });
    assert!(runtime.store().get(KEY_FEEDBACK_HISTORY).unwrap().is_some());
}

#[test]
fn persistence_outage_is_tracked_once_and_recovers() {
    let store = Arc::new(InMemoryStore::new());
    let runtime = TaxonRuntime::open_with_store(
        RuntimeOptions::in_memory(),
        Arc::clone(&store) as Arc<dyn KeyValueStore>,
    )
    .unwrap();

    store.set_unavailable(true);
    teach(&runtime, 1);
    assert!(!runtime.flush().is_clean());
    assert!(!runtime.flush().is_clean());
    let outages = runtime.degradations();
    assert_eq!(outages.len(), 1);
    assert_eq!(outages[0].event.component, "persistence");
    assert_eq!(outages[0].recovery_status, RecoveryStatus::Active);

    store.set_unavailable(false);
    assert!(runtime.flush().is_clean());
    let outages = runtime.degradations();
    assert_eq!(outages.len(), 1);
    assert_eq!(outages[0].recovery_status, RecoveryStatus::Recovered);
    assert!(store.get(KEY_FEEDBACK_HISTORY).unwrap().is_some());
}

// ── Overrides ──

const TAXONOMY: &str = r#"
[[categories]]
id = "technology"
name = "Technology"
core = ["rust", "compiler"]

[[categories]]
id = "general"
name = "General"
core = ["administrative"]
"#;

const REFERENCE: &str = r#"
[leadership]
grade_patterns = ["^d-?[12]$"]
title_indicators = ["director"]

[domain_terms.technology]
terms = ["rust"]
"#;

#[test]
fn taxonomy_and_reference_files_override_builtins() {
    let dir = tempfile::tempdir().unwrap();
    let taxonomy_path = dir.path().join("taxonomy.toml");
    let reference_path = dir.path().join("reference.toml");
    std::fs::write(&taxonomy_path, TAXONOMY).unwrap();
    std::fs::write(&reference_path, REFERENCE).unwrap();

    let runtime = TaxonRuntime::open(RuntimeOptions {
        taxonomy_path: Some(taxonomy_path),
        reference_path: Some(reference_path),
        ..RuntimeOptions::default()
    })
    .unwrap();
    assert_eq!(runtime.dictionary().snapshot().unwrap().categories().len(), 2);

    let result = runtime
        .classify(&JobPosting::new("1", "Rust Compiler Engineer"))
        .unwrap();
    assert_eq!(result.primary, "technology");
}

#[test]
fn reference_mentioning_unknown_category_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let taxonomy_path = dir.path().join("taxonomy.toml");
    std::fs::write(&taxonomy_path, TAXONOMY).unwrap();

    // The built-in reference tables name categories this taxonomy lacks.
    let err = TaxonRuntime::open(RuntimeOptions {
        taxonomy_path: Some(taxonomy_path),
        ..RuntimeOptions::default()
    })
    .err()
    .unwrap();
    assert!(matches!(err, TaxonError::DictionaryError(_)));
}

#[test]
fn missing_override_file_is_a_config_error() {
    let err = TaxonRuntime::open(RuntimeOptions {
        reference_path: Some("/nonexistent/reference.toml".into()),
        ..RuntimeOptions::default()
    })
    .err()
    .unwrap();
    assert!(matches!(err, TaxonError::ConfigError(_)));
}

#[test]
fn inconsistent_config_is_rejected() {
    let mut config = TaxonConfig::default();
    config.learning.auto_apply_threshold = 0.2;
    let err = TaxonRuntime::open(RuntimeOptions {
        config,
        ..RuntimeOptions::default()
    })
    .err()
    .unwrap();
    assert!(err.to_string().contains("auto_apply_threshold"));
}
