//! TaxonRuntime: owns the dictionary, classifier, learning engine, and
//! persistence for one process.
//!
//! There is no global instance: callers open a runtime and share it
//! (usually behind an `Arc`). Classification and learning both read the
//! same [`DictionaryStore`], so a change applied by learning is visible to
//! the next classification call.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{info, warn};

use taxon_classifier::{Classifier, EmergingTerm};
use taxon_core::config::TaxonConfig;
use taxon_core::constants::MAX_RESULT_LIMIT;
use taxon_core::errors::{ConfigError, StorageError, TaxonResult};
use taxon_core::models::{
    ApplyOutcome, ClassificationResult, DictionaryUpdateSuggestion, FeedbackRecord, JobPosting,
    LearningInsights,
};
use taxon_core::traits::KeyValueStore;
use taxon_dictionary::{default_reference, default_taxonomy, DictionaryStore, ReferenceData, Taxonomy};
use taxon_learning::LearningEngine;
use taxon_observability::{init_tracing, DegradationEvent, DegradationTracker, TrackedDegradation};
use taxon_storage::{FlushReport, InMemoryStore, PersistenceQueue, SqliteStore};

const PERSISTENCE_COMPONENT: &str = "persistence";

/// Options for opening a runtime.
#[derive(Debug, Clone, Default)]
pub struct RuntimeOptions {
    pub config: TaxonConfig,
    /// SQLite database file. `None` keeps all state in memory.
    pub db_path: Option<PathBuf>,
    /// Seed taxonomy TOML used when nothing is persisted yet.
    /// Defaults to the built-in taxonomy.
    pub taxonomy_path: Option<PathBuf>,
    /// Reference tables TOML. Defaults to the built-in tables.
    pub reference_path: Option<PathBuf>,
    /// Install the global tracing subscriber from `config.observability`.
    pub init_logging: bool,
}

impl RuntimeOptions {
    /// In-memory runtime with default configuration.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Persist to the database named in `config.storage.db_path`.
    pub fn persistent(config: TaxonConfig) -> Self {
        let db_path = PathBuf::from(&config.storage.db_path);
        Self {
            config,
            db_path: Some(db_path),
            ..Self::default()
        }
    }
}

/// The central runtime owning all taxon subsystems.
pub struct TaxonRuntime {
    config: TaxonConfig,
    store: Arc<dyn KeyValueStore>,
    dictionary: Arc<DictionaryStore>,
    classifier: Classifier,
    learning: LearningEngine,
    persistence: Arc<PersistenceQueue>,
    degradation: Mutex<DegradationTracker>,
}

impl TaxonRuntime {
    pub fn open(opts: RuntimeOptions) -> TaxonResult<Self> {
        opts.config.validate()?;
        if opts.init_logging {
            init_tracing(&opts.config.observability);
        }

        let store: Arc<dyn KeyValueStore> = match &opts.db_path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|e| StorageError::Unavailable {
                        reason: format!("cannot create {}: {e}", parent.display()),
                    })?;
                }
                Arc::new(SqliteStore::open(path, u64::from(opts.config.storage.busy_timeout_ms))?)
            }
            None => Arc::new(InMemoryStore::new()),
        };
        Self::assemble(opts, store)
    }

    /// Open on top of an existing store. `db_path` is ignored.
    pub fn open_with_store(opts: RuntimeOptions, store: Arc<dyn KeyValueStore>) -> TaxonResult<Self> {
        opts.config.validate()?;
        if opts.init_logging {
            init_tracing(&opts.config.observability);
        }
        Self::assemble(opts, store)
    }

    fn assemble(opts: RuntimeOptions, store: Arc<dyn KeyValueStore>) -> TaxonResult<Self> {
        let config = opts.config;
        let seed = match &opts.taxonomy_path {
            Some(path) => Taxonomy::from_toml(&read_file(path)?)?,
            None => default_taxonomy()?,
        };
        let dictionary = Arc::new(DictionaryStore::load(store.as_ref(), seed)?);

        let reference = match &opts.reference_path {
            Some(path) => ReferenceData::from_toml(&read_file(path)?)?,
            None => default_reference()?,
        };
        reference.validate_against(dictionary.snapshot()?.taxonomy())?;
        let reference = Arc::new(reference);

        let classifier = Classifier::new(
            Arc::clone(&dictionary),
            Arc::clone(&reference),
            config.scoring.clone(),
        )
        .with_history_cap(config.retention.classification_history_cap);

        let persistence = Arc::new(PersistenceQueue::new(Arc::clone(&store)));
        let learning = LearningEngine::new(
            Arc::clone(&dictionary),
            reference,
            config.learning.clone(),
            &config.retention,
        )
        .with_persistence(Arc::clone(&persistence));
        learning.restore(store.as_ref())?;

        let snapshot = dictionary.snapshot()?;
        info!(
            categories = snapshot.categories().len(),
            persistent = opts.db_path.is_some(),
            "taxon runtime ready"
        );

        Ok(Self {
            config,
            store,
            dictionary,
            classifier,
            learning,
            persistence,
            degradation: Mutex::new(DegradationTracker::new()),
        })
    }

    pub fn config(&self) -> &TaxonConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &Arc<DictionaryStore> {
        &self.dictionary
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn learning(&self) -> &LearningEngine {
        &self.learning
    }

    pub fn classify(&self, job: &JobPosting) -> TaxonResult<ClassificationResult> {
        self.classifier.classify(job)
    }

    pub fn classify_batch(&self, jobs: &[JobPosting]) -> TaxonResult<Vec<ClassificationResult>> {
        self.classifier.classify_batch(jobs)
    }

    pub fn emerging_terms(
        &self,
        jobs: &[JobPosting],
        min_frequency: usize,
        limit: usize,
    ) -> TaxonResult<Vec<EmergingTerm>> {
        self.classifier
            .emerging_terms(jobs, min_frequency, clamp_limit(limit))
    }

    pub fn recent_results(&self, limit: usize) -> Vec<ClassificationResult> {
        self.classifier.recent_results(clamp_limit(limit))
    }

    pub fn process_feedback(
        &self,
        record: FeedbackRecord,
    ) -> TaxonResult<Vec<DictionaryUpdateSuggestion>> {
        self.learning.process_feedback(record)
    }

    pub fn approve_proposal(&self, key: &str) -> TaxonResult<ApplyOutcome> {
        self.learning.approve_proposal(key)
    }

    pub fn pending_proposals(&self, limit: usize) -> Vec<DictionaryUpdateSuggestion> {
        self.learning.pending_proposals(clamp_limit(limit))
    }

    pub fn learning_insights(&self, limit: usize) -> LearningInsights {
        self.learning.learning_insights(clamp_limit(limit))
    }

    /// Write pending state to the store. Failed keys stay queued for the
    /// next flush and mark persistence as degraded until a clean flush.
    /// Repeated failures during one outage record a single degradation.
    pub fn flush(&self) -> FlushReport {
        let report = self.persistence.flush();
        let Ok(mut tracker) = self.degradation.lock() else {
            return report;
        };
        let degraded = tracker
            .active_degradations()
            .iter()
            .any(|d| d.event.component == PERSISTENCE_COMPONENT);
        if report.is_clean() {
            if degraded {
                tracker.mark_recovered(PERSISTENCE_COMPONENT);
            }
        } else if !degraded {
            tracker.record(DegradationEvent::new(
                PERSISTENCE_COMPONENT,
                format!("{} key(s) failed to persist", report.failed),
                "in-memory retention",
            ));
        }
        report
    }

    /// Queue every piece of learning state and the dictionary, then flush.
    pub fn shutdown(&self) -> FlushReport {
        self.learning.persist_all();
        let report = self.flush();
        if !report.is_clean() {
            warn!(failed = report.failed, "state not fully persisted at shutdown");
        }
        report
    }

    /// Flush in the background every `storage.flush_interval_secs`.
    /// Must be called from within a Tokio runtime.
    pub fn spawn_flush_loop(&self) -> tokio::task::JoinHandle<()> {
        let secs = self.config.storage.flush_interval_secs.max(1);
        taxon_storage::spawn_flush_loop(Arc::clone(&self.persistence), Duration::from_secs(secs))
    }

    /// Classifier fallbacks and persistence outages, oldest first.
    pub fn degradations(&self) -> Vec<TrackedDegradation> {
        let mut all = self.classifier.degradations();
        if let Ok(tracker) = self.degradation.lock() {
            all.extend(tracker.events().iter().cloned());
        }
        all.sort_by_key(|d| d.event.timestamp);
        all
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }
}

fn clamp_limit(limit: usize) -> usize {
    limit.min(MAX_RESULT_LIMIT)
}

fn read_file(path: &Path) -> TaxonResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
