//! End-to-end learning: feedback in, dictionary changes and audit trail out.

use std::sync::Arc;

use proptest::prelude::*;

use taxon_core::config::{LearningConfig, RetentionConfig};
use taxon_core::constants::{KEY_DICTIONARY, KEY_FEEDBACK_HISTORY, KEY_PROPOSALS};
use taxon_core::errors::TaxonError;
use taxon_core::models::{
    ApplyOutcome, DictionaryUpdate, FeedbackJob, FeedbackRecord, FeedbackStatus, Judgement,
    KeywordTier, LearningActionKind, OriginalClassification, SuggestionAction,
};
use taxon_core::traits::KeyValueStore;
use taxon_dictionary::{default_reference, default_taxonomy, DictionaryStore};
use taxon_learning::LearningEngine;
use taxon_storage::{InMemoryStore, PersistenceQueue};

fn engine_with(dictionary: Arc<DictionaryStore>) -> LearningEngine {
    LearningEngine::new(
        dictionary,
        Arc::new(default_reference().unwrap()),
        LearningConfig::default(),
        &RetentionConfig::default(),
    )
}

fn engine() -> (LearningEngine, Arc<DictionaryStore>) {
    let dictionary = Arc::new(DictionaryStore::with_seed().unwrap());
    (engine_with(Arc::clone(&dictionary)), dictionary)
}

fn feedback(n: usize, title: &str, original: &str, confidence: u8, judgement: Judgement) -> FeedbackRecord {
    FeedbackRecord::new(
        FeedbackJob {
            id: format!("job-{n}"),
            title: title.to_string(),
            ..Default::default()
        },
        OriginalClassification {
            primary: original.to_string(),
            confidence,
        },
        judgement,
    )
}

fn correction(n: usize, title: &str, to: &str) -> FeedbackRecord {
    feedback(
        n,
        title,
        "general",
        30,
        Judgement::Corrected {
            category_id: to.to_string(),
        },
    )
}

fn confirmation(n: usize, title: &str, category: &str) -> FeedbackRecord {
    feedback(n, title, category, 80, Judgement::ConfirmedCorrect)
}

// ── Corrections ──

#[test]
fn repeated_corrections_promote_keyword_to_core() {
    let (engine, dictionary) = engine();

    for n in 1..=4 {
        engine
            .process_feedback(correction(n, "Blockchain Developer", "technology"))
            .unwrap();
    }
    let fifth = engine
        .process_feedback(correction(5, "Blockchain Developer", "technology"))
        .unwrap();
    assert!(fifth
        .iter()
        .any(|s| s.category_id == "technology" && s.confidence >= 0.5));
    assert!(!dictionary
        .snapshot()
        .unwrap()
        .category("technology")
        .unwrap()
        .core
        .contains("blockchain"));

    for n in 6..=8 {
        engine
            .process_feedback(correction(n, "Blockchain Developer", "technology"))
            .unwrap();
    }
    let snapshot = dictionary.snapshot().unwrap();
    assert!(snapshot.category("technology").unwrap().core.contains("blockchain"));

    let applied: Vec<_> = engine
        .learning_actions(50)
        .into_iter()
        .filter(|a| a.kind == LearningActionKind::CategoryUpdate)
        .collect();
    assert!(!applied.is_empty());
    assert!(applied.iter().all(|a| a.auto_applied && a.confidence >= 0.8));

    let updates = engine.dictionary_updates(50);
    let core = updates
        .iter()
        .find(|u| u.update == DictionaryUpdate::keyword(KeywordTier::Core, "blockchain"))
        .expect("core update recorded");
    assert_eq!(core.outcome, ApplyOutcome::Applied);
    assert_eq!(core.source_feedback_ids.len(), 8);
}

#[test]
fn processed_record_carries_extraction_results() {
    let (engine, _) = engine();
    engine
        .process_feedback(correction(1, "Blockchain Developer", "technology"))
        .unwrap();
    let history = engine.feedback_history(10);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, FeedbackStatus::Processed);
    assert!(history[0].extracted_keywords.iter().any(|k| k == "blockchain"));
}

#[test]
fn correction_to_unknown_category_is_rejected() {
    let (engine, _) = engine();
    let err = engine
        .process_feedback(correction(1, "Zookeeper", "zoology"))
        .unwrap_err();
    assert!(matches!(err, TaxonError::InvalidFeedback { .. }));
    assert!(engine.feedback_history(10).is_empty());
}

// ── Confirmations ──

#[test]
fn confirmation_only_reinforces() {
    let (engine, dictionary) = engine();
    let version = dictionary.version().unwrap();

    let suggestions = engine
        .process_feedback(confirmation(1, "Blockchain Software Developer", "technology"))
        .unwrap();
    assert!(suggestions.is_empty());
    assert!(engine.pending_proposals(10).is_empty());
    assert_eq!(dictionary.version().unwrap(), version);

    let actions = engine.learning_actions(10);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].kind, LearningActionKind::PositiveReinforcement);
    assert!((actions[0].confidence - 0.8).abs() < 1e-9);

    let patterns = engine.learned_patterns();
    assert!(patterns
        .iter()
        .any(|p| p.category_id == "technology" && p.keyword == "blockchain"));
}

#[test]
fn learned_patterns_respect_retention_cap() {
    let retention = RetentionConfig {
        learned_pattern_cap: 2,
        ..RetentionConfig::default()
    };
    let engine = LearningEngine::new(
        Arc::new(DictionaryStore::with_seed().unwrap()),
        Arc::new(default_reference().unwrap()),
        LearningConfig::default(),
        &retention,
    );
    let titles = [
        "Blockchain Kubernetes Developer",
        "Quantum Microservices Engineer",
        "Rust Fullstack Developer",
    ];
    for (n, title) in titles.iter().enumerate() {
        engine
            .process_feedback(confirmation(n, title, "technology"))
            .unwrap();
    }
    assert_eq!(engine.learned_patterns().len(), 2);
}

// ── Proposals ──

#[test]
fn moderate_suggestions_wait_for_approval() {
    let (engine, dictionary) = engine();
    for n in 1..=5 {
        engine
            .process_feedback(correction(n, "Blockchain Developer", "technology"))
            .unwrap();
    }

    let pending = engine.pending_proposals(10);
    let support = pending
        .iter()
        .find(|s| s.action == SuggestionAction::AddSupportKeyword)
        .expect("support keyword proposal");
    assert!(support.confidence >= 0.4 && support.confidence < 0.8);
    assert_eq!(support.frequency, 5);

    let key = support.key();
    assert_eq!(engine.approve_proposal(&key).unwrap(), ApplyOutcome::Applied);
    assert!(dictionary
        .snapshot()
        .unwrap()
        .category("technology")
        .unwrap()
        .support
        .contains("blockchain"));

    let addition = engine
        .learning_actions(20)
        .into_iter()
        .find(|a| a.kind == LearningActionKind::KeywordAddition)
        .expect("keyword addition action");
    assert!(!addition.auto_applied);

    let err = engine.approve_proposal(&key).unwrap_err();
    assert!(matches!(err, TaxonError::ProposalNotFound { .. }));
}

#[test]
fn proposals_merge_across_feedback() {
    let (engine, _) = engine();
    for n in 1..=6 {
        engine
            .process_feedback(correction(n, "Blockchain Developer", "technology"))
            .unwrap();
    }
    let pending = engine.pending_proposals(10);
    let support: Vec<_> = pending
        .iter()
        .filter(|s| s.update == DictionaryUpdate::keyword(KeywordTier::Support, "blockchain"))
        .collect();
    assert_eq!(support.len(), 1);
    assert!((support[0].confidence - 0.6).abs() < 1e-9);
    assert_eq!(support[0].supporting_feedback_ids.len(), 6);
}

// ── Insights ──

#[test]
fn insights_report_accuracy_and_misclassifications() {
    let (engine, _) = engine();
    engine
        .process_feedback(confirmation(1, "Software Developer", "technology"))
        .unwrap();
    engine
        .process_feedback(confirmation(2, "Cloud Engineer", "technology"))
        .unwrap();
    engine
        .process_feedback(correction(3, "Blockchain Developer", "technology"))
        .unwrap();
    engine
        .process_feedback(correction(4, "Blockchain Auditor", "technology"))
        .unwrap();

    let insights = engine.learning_insights(10);
    assert_eq!(insights.total_feedback, 4);
    assert!((insights.overall_accuracy - 0.5).abs() < 1e-9);

    let tech = insights
        .category_accuracy
        .iter()
        .find(|c| c.category_id == "technology")
        .unwrap();
    assert_eq!((tech.total, tech.correct), (2, 2));
    let general = insights
        .category_accuracy
        .iter()
        .find(|c| c.category_id == "general")
        .unwrap();
    assert_eq!(general.accuracy, 0.0);

    let confusion = &insights.misclassifications[0];
    assert_eq!(confusion.from_category, "general");
    assert_eq!(confusion.to_category, "technology");
    assert_eq!(confusion.count, 2);
    assert!(confusion.example_keywords.iter().any(|k| k == "blockchain"));

    assert!(insights
        .keyword_suggestions
        .iter()
        .any(|k| k.category_id == "technology" && k.keyword == "blockchain" && k.supporting_jobs == 2));
}

#[test]
fn empty_insights() {
    let (engine, _) = engine();
    let insights = engine.learning_insights(10);
    assert_eq!(insights.total_feedback, 0);
    assert_eq!(insights.overall_accuracy, 0.0);
    assert!(insights.category_accuracy.is_empty());
}

// ── Persistence ──

#[test]
fn state_survives_flush_and_restore() {
    let kv = Arc::new(InMemoryStore::new());
    let queue = Arc::new(PersistenceQueue::new(kv.clone()));
    let dictionary = Arc::new(DictionaryStore::with_seed().unwrap());
    let engine = engine_with(Arc::clone(&dictionary)).with_persistence(Arc::clone(&queue));

    for n in 1..=8 {
        engine
            .process_feedback(correction(n, "Blockchain Developer", "technology"))
            .unwrap();
    }
    assert!(queue.flush().is_clean());
    assert!(kv.get(KEY_DICTIONARY).unwrap().is_some());
    assert!(kv.get(KEY_FEEDBACK_HISTORY).unwrap().is_some());

    let reloaded = Arc::new(DictionaryStore::load(kv.as_ref(), default_taxonomy().unwrap()).unwrap());
    assert!(reloaded
        .snapshot()
        .unwrap()
        .category("technology")
        .unwrap()
        .core
        .contains("blockchain"));

    let restored = engine_with(reloaded);
    restored.restore(kv.as_ref()).unwrap();
    assert_eq!(restored.feedback_history(100).len(), 8);
    assert_eq!(
        restored.dictionary_updates(100).len(),
        engine.dictionary_updates(100).len()
    );
    assert_eq!(restored.learned_patterns(), engine.learned_patterns());
    assert_eq!(restored.pending_proposals(10), engine.pending_proposals(10));
}

#[test]
fn unreadable_state_is_skipped_on_restore() {
    let kv = InMemoryStore::new();
    kv.put(KEY_PROPOSALS, "not json").unwrap();
    let (engine, _) = engine();
    engine.restore(&kv).unwrap();
    assert!(engine.pending_proposals(10).is_empty());
}

#[test]
fn unavailable_store_does_not_block_learning() {
    let kv = Arc::new(InMemoryStore::new());
    kv.set_unavailable(true);
    let queue = Arc::new(PersistenceQueue::new(kv.clone()));
    let (engine, _) = engine();
    let engine = engine.with_persistence(Arc::clone(&queue));

    engine
        .process_feedback(correction(1, "Blockchain Developer", "technology"))
        .unwrap();
    let report = queue.flush();
    assert!(!report.is_clean());
    assert!(queue.pending_len() > 0);

    kv.set_unavailable(false);
    assert!(queue.flush().is_clean());
    assert!(kv.get(KEY_FEEDBACK_HISTORY).unwrap().is_some());
}

// ── Properties ──

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn thresholds_partition_suggestions(count in 1usize..12) {
        let (engine, _) = engine();
        for n in 0..count {
            let suggestions = engine
                .process_feedback(correction(n, "Blockchain Developer", "technology"))
                .unwrap();
            for s in &suggestions {
                prop_assert!(s.confidence >= 0.4 && s.confidence <= 1.0);
            }
        }
        for pending in engine.pending_proposals(100) {
            prop_assert!(pending.confidence < 0.8);
        }
        for update in engine.dictionary_updates(100) {
            prop_assert!(update.confidence >= 0.8);
        }
    }
}
