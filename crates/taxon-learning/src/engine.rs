//! LearningEngine: owns the feedback history, audit logs, learned patterns,
//! and proposal queue; decides which suggestions become dictionary state.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use taxon_core::config::{LearningConfig, RetentionConfig};
use taxon_core::constants::{
    KEY_DICTIONARY, KEY_DICTIONARY_UPDATES, KEY_FEEDBACK_HISTORY, KEY_LEARNED_PATTERNS,
    KEY_LEARNING_ACTIONS, KEY_PROPOSALS,
};
use taxon_core::errors::{StorageError, TaxonError, TaxonResult};
use taxon_core::models::{
    ApplyOutcome, DictionaryUpdateRecord, DictionaryUpdateSuggestion, FeedbackRecord,
    FeedbackStatus, Judgement, LearnedPattern, LearningAction, LearningActionKind,
    LearningInsights,
};
use taxon_core::traits::KeyValueStore;
use taxon_dictionary::{DictionarySnapshot, DictionaryStore, ReferenceData};
use taxon_observability::tracing_setup::events;
use taxon_storage::PersistenceQueue;

use crate::audit::BoundedLog;
use crate::extraction::FeedbackStats;
use crate::feedback_processor::{self, LearningContext};
use crate::insights::{self, InsightSources};
use crate::patterns::LearnedPatternTable;
use crate::proposals::ProposalQueue;

/// The dictionary learning engine.
///
/// Suggestions at or above the auto-apply threshold are merged into the
/// shared [`DictionaryStore`] immediately; the rest wait in the proposal
/// queue. Persistence is best-effort through an optional
/// [`PersistenceQueue`]; a failed write never undoes a dictionary change.
pub struct LearningEngine {
    dictionary: Arc<DictionaryStore>,
    reference: Arc<ReferenceData>,
    config: LearningConfig,
    history: BoundedLog<FeedbackRecord>,
    actions: BoundedLog<LearningAction>,
    updates: BoundedLog<DictionaryUpdateRecord>,
    patterns: LearnedPatternTable,
    proposals: ProposalQueue,
    persistence: Option<Arc<PersistenceQueue>>,
}

impl LearningEngine {
    pub fn new(
        dictionary: Arc<DictionaryStore>,
        reference: Arc<ReferenceData>,
        config: LearningConfig,
        retention: &RetentionConfig,
    ) -> Self {
        Self {
            dictionary,
            reference,
            config,
            history: BoundedLog::new(retention.feedback_history_cap),
            actions: BoundedLog::new(retention.learning_action_cap),
            updates: BoundedLog::new(retention.dictionary_update_cap),
            patterns: LearnedPatternTable::with_capacity(retention.learned_pattern_cap),
            proposals: ProposalQueue::new(retention.proposal_cap),
            persistence: None,
        }
    }

    pub fn with_persistence(mut self, queue: Arc<PersistenceQueue>) -> Self {
        self.persistence = Some(queue);
        self
    }

    /// Reload history, audit logs, patterns, and proposals.
    ///
    /// These are caches and logs, so an unreadable value is logged and
    /// skipped rather than failing startup.
    pub fn restore(&self, kv: &dyn KeyValueStore) -> TaxonResult<()> {
        let restorers: [(&str, &dyn Fn(&str) -> TaxonResult<()>); 5] = [
            (KEY_FEEDBACK_HISTORY, &|json| self.history.restore_json(json)),
            (KEY_LEARNING_ACTIONS, &|json| self.actions.restore_json(json)),
            (KEY_DICTIONARY_UPDATES, &|json| self.updates.restore_json(json)),
            (KEY_PROPOSALS, &|json| self.proposals.restore_json(json)),
            (KEY_LEARNED_PATTERNS, &|json| {
                let patterns: Vec<LearnedPattern> = serde_json::from_str(json)?;
                self.patterns.replace(patterns);
                Ok(())
            }),
        ];
        for (key, restore) in restorers {
            let Some(json) = kv.get(key)? else {
                continue;
            };
            if let Err(e) = restore(&json) {
                let err = StorageError::CorruptValue {
                    key: key.to_string(),
                    reason: e.to_string(),
                };
                warn!(error = %err, "skipping unreadable learning state");
            }
        }
        Ok(())
    }

    /// Record a human judgement and learn from it.
    ///
    /// Returns every suggestion produced, whether it was applied, queued, or
    /// already present in the dictionary.
    pub fn process_feedback(
        &self,
        mut record: FeedbackRecord,
    ) -> TaxonResult<Vec<DictionaryUpdateSuggestion>> {
        let kind = match record.judgement {
            Judgement::ConfirmedCorrect => "confirmed",
            Judgement::Corrected { .. } => "corrected",
        };
        let span = taxon_observability::learning_span!(record.id, kind);
        let _guard = span.enter();

        let snapshot = self.dictionary.snapshot()?;
        validate(&record, &snapshot)?;

        let mut history = self.history.to_vec();
        history.push(record.clone());
        let stats = FeedbackStats::new(&history);
        let ctx = LearningContext {
            snapshot: &snapshot,
            reference: &self.reference,
            stats: &stats,
            config: &self.config,
        };
        let output = feedback_processor::process(&record, &ctx, &self.patterns);

        record.extracted_keywords = output
            .extracted_keywords
            .iter()
            .map(|k| k.keyword.clone())
            .collect();
        record.suggestions = output.suggestions.clone();
        let feedback_id = record.id.clone();
        let job_id = record.job.id.clone();
        self.actions.push(output.action);

        let routed = self.route(&output.suggestions, &job_id);
        record.status = if routed.is_ok() {
            FeedbackStatus::Processed
        } else {
            FeedbackStatus::Failed
        };
        self.history.push(record);

        let applied = match routed {
            Ok(applied) => applied,
            Err(e) => {
                self.persist(true);
                return Err(e);
            }
        };
        events::feedback_processed(&feedback_id, output.suggestions.len(), applied);
        self.persist(applied > 0);
        Ok(output.suggestions)
    }

    /// Apply a queued proposal by key (see [`DictionaryUpdateSuggestion::key`]).
    pub fn approve_proposal(&self, key: &str) -> TaxonResult<ApplyOutcome> {
        let span = taxon_observability::approval_span!(key);
        let _guard = span.enter();

        let suggestion = self
            .proposals
            .take(key)
            .ok_or_else(|| TaxonError::ProposalNotFound {
                key: key.to_string(),
            })?;
        let job_ids = self.job_ids_for(&suggestion.supporting_feedback_ids);
        match self.apply(&suggestion, false, job_ids) {
            Ok(outcome) => {
                self.persist(outcome == ApplyOutcome::Applied);
                Ok(outcome)
            }
            Err(e) => {
                self.proposals.merge(suggestion);
                Err(e)
            }
        }
    }

    /// Queued proposals, highest confidence first.
    pub fn pending_proposals(&self, limit: usize) -> Vec<DictionaryUpdateSuggestion> {
        self.proposals.pending(limit)
    }

    /// Read-only report over the retained feedback; lists are capped at `limit`.
    pub fn learning_insights(&self, limit: usize) -> LearningInsights {
        let snapshot = match self.dictionary.snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "dictionary unavailable, insights limited to counts");
                return LearningInsights {
                    total_feedback: self.history.len(),
                    ..Default::default()
                };
            }
        };
        let history = self.history.to_vec();
        insights::compute(
            InsightSources {
                history: &history,
                recent_actions: self.actions.recent(limit),
                pending_proposals: self.proposals.pending(limit),
                snapshot: &snapshot,
                reference: &self.reference,
                config: &self.config,
            },
            limit,
        )
    }

    /// Newest first.
    pub fn feedback_history(&self, limit: usize) -> Vec<FeedbackRecord> {
        self.history.recent(limit)
    }

    /// Newest first.
    pub fn learning_actions(&self, limit: usize) -> Vec<LearningAction> {
        self.actions.recent(limit)
    }

    /// Newest first.
    pub fn dictionary_updates(&self, limit: usize) -> Vec<DictionaryUpdateRecord> {
        self.updates.recent(limit)
    }

    pub fn learned_patterns(&self) -> Vec<LearnedPattern> {
        self.patterns.all()
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    /// Queue every collection (and the dictionary) for the next flush.
    pub fn persist_all(&self) {
        self.persist(true);
    }

    /// Auto-apply strong suggestions, queue the rest. Returns how many
    /// changed the dictionary.
    fn route(&self, suggestions: &[DictionaryUpdateSuggestion], job_id: &str) -> TaxonResult<usize> {
        let mut applied = 0;
        for suggestion in suggestions {
            if suggestion.confidence >= self.config.auto_apply_threshold {
                let mut job_ids = self.job_ids_for(&suggestion.supporting_feedback_ids);
                if !job_ids.iter().any(|id| id == job_id) {
                    job_ids.push(job_id.to_string());
                }
                if self.apply(suggestion, true, job_ids)? == ApplyOutcome::Applied {
                    applied += 1;
                }
            } else {
                events::suggestion_queued(
                    &suggestion.category_id,
                    &suggestion.update.describe(),
                    suggestion.confidence,
                );
                self.proposals.merge(suggestion.clone());
            }
        }
        Ok(applied)
    }

    fn apply(
        &self,
        suggestion: &DictionaryUpdateSuggestion,
        auto: bool,
        job_ids: Vec<String>,
    ) -> TaxonResult<ApplyOutcome> {
        let outcome = self
            .dictionary
            .apply_update(&suggestion.category_id, &suggestion.update)?;
        let version = self.dictionary.version()?;
        self.proposals.remove(&suggestion.key());
        self.updates.push(DictionaryUpdateRecord {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            category_id: suggestion.category_id.clone(),
            update: suggestion.update.clone(),
            outcome,
            confidence: suggestion.confidence,
            source_feedback_ids: suggestion.supporting_feedback_ids.clone(),
            dictionary_version: version,
        });

        if outcome == ApplyOutcome::Applied {
            let description = suggestion.update.describe();
            events::dictionary_updated(&suggestion.category_id, &description, version, auto);
            let kind = if auto {
                LearningActionKind::CategoryUpdate
            } else {
                LearningActionKind::KeywordAddition
            };
            let mut action = LearningAction::new(
                kind,
                suggestion.category_id.as_str(),
                format!("added {description} to '{}'", suggestion.category_id),
                suggestion.confidence,
            )
            .with_jobs(job_ids);
            if auto {
                action = action.applied();
            }
            self.actions.push(action);
        }
        Ok(outcome)
    }

    fn job_ids_for(&self, feedback_ids: &[String]) -> Vec<String> {
        let history = self.history.to_vec();
        let mut job_ids: Vec<String> = Vec::new();
        for record in history.iter().filter(|r| feedback_ids.contains(&r.id)) {
            if !job_ids.contains(&record.job.id) {
                job_ids.push(record.job.id.clone());
            }
        }
        job_ids
    }

    fn persist(&self, include_dictionary: bool) {
        let Some(queue) = &self.persistence else {
            return;
        };
        let patterns = serde_json::to_string(&self.patterns.all()).map_err(TaxonError::from);
        let entries = [
            (KEY_FEEDBACK_HISTORY, self.history.to_json()),
            (KEY_LEARNING_ACTIONS, self.actions.to_json()),
            (KEY_DICTIONARY_UPDATES, self.updates.to_json()),
            (KEY_PROPOSALS, self.proposals.to_json()),
            (KEY_LEARNED_PATTERNS, patterns),
        ];
        for (key, json) in entries {
            match json {
                Ok(json) => queue.enqueue(key, json),
                Err(e) => warn!(key, error = %e, "failed to serialize learning state"),
            }
        }
        if include_dictionary {
            match self
                .dictionary
                .snapshot()
                .and_then(|s| s.taxonomy().to_json())
            {
                Ok(json) => queue.enqueue(KEY_DICTIONARY, json),
                Err(e) => warn!(error = %e, "failed to serialize dictionary"),
            }
        }
    }
}

fn validate(record: &FeedbackRecord, snapshot: &DictionarySnapshot) -> TaxonResult<()> {
    if let Judgement::Corrected { category_id } = &record.judgement {
        if snapshot.category(category_id).is_none() {
            return Err(TaxonError::InvalidFeedback {
                feedback_id: record.id.clone(),
                reason: format!("corrected category '{category_id}' is not in the dictionary"),
            });
        }
    }
    Ok(())
}
