//! Classifier: wires the pipeline to the shared dictionary.
//!
//! Scoring faults never escape: a panic while classifying one job is caught,
//! logged, recorded as a degradation, and replaced by the fallback result.
//! Only an unusable dictionary is reported to the caller.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use rayon::prelude::*;
use tracing::warn;

use taxon_core::config::ScoringConfig;
use taxon_core::config::defaults::DEFAULT_CLASSIFICATION_HISTORY_CAP;
use taxon_core::errors::{TaxonError, TaxonResult};
use taxon_core::models::{
    clamp_confidence, ClassificationFlags, ClassificationResult, ClassificationSource, JobPosting,
    SecondaryCandidate,
};
use taxon_dictionary::{DictionarySnapshot, DictionaryStore, ReferenceData};
use taxon_observability::tracing_setup::events;
use taxon_observability::{DegradationEvent, DegradationTracker, TrackedDegradation};

use crate::detector;
use crate::extractor::extract;
use crate::leadership::{self, LeadershipDecision};
use crate::scorer::{CategoryScorer, KeywordScorer};

const COMPONENT: &str = "classifier";

pub struct Classifier {
    dictionary: Arc<DictionaryStore>,
    reference: Arc<ReferenceData>,
    scorer: Arc<dyn CategoryScorer>,
    config: ScoringConfig,
    history: Mutex<VecDeque<ClassificationResult>>,
    history_cap: usize,
    degradation: Mutex<DegradationTracker>,
}

impl Classifier {
    pub fn new(
        dictionary: Arc<DictionaryStore>,
        reference: Arc<ReferenceData>,
        config: ScoringConfig,
    ) -> Self {
        let scorer = Arc::new(KeywordScorer::new(config.clone(), Arc::clone(&reference)));
        Self {
            dictionary,
            reference,
            scorer,
            config,
            history: Mutex::new(VecDeque::new()),
            history_cap: DEFAULT_CLASSIFICATION_HISTORY_CAP,
            degradation: Mutex::new(DegradationTracker::new()),
        }
    }

    /// Replace the scorer (e.g. to experiment with alternative weighting).
    pub fn with_scorer(mut self, scorer: Arc<dyn CategoryScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_history_cap(mut self, cap: usize) -> Self {
        self.history_cap = cap;
        self
    }

    pub fn dictionary(&self) -> &Arc<DictionaryStore> {
        &self.dictionary
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Classify one job against the current dictionary snapshot.
    pub fn classify(&self, job: &JobPosting) -> TaxonResult<ClassificationResult> {
        let snapshot = self.usable_snapshot()?;
        let span = taxon_observability::classify_span!(job.id);
        let _guard = span.enter();
        let result = self.classify_guarded(job, &snapshot);
        self.remember(std::slice::from_ref(&result));
        Ok(result)
    }

    /// Classify jobs in parallel against one shared snapshot.
    /// Results are returned in input order.
    pub fn classify_batch(&self, jobs: &[JobPosting]) -> TaxonResult<Vec<ClassificationResult>> {
        let snapshot = self.usable_snapshot()?;
        let span = taxon_observability::batch_span!(jobs.len());
        let _guard = span.enter();
        let results: Vec<ClassificationResult> = jobs
            .par_iter()
            .map(|job| self.classify_guarded(job, &snapshot))
            .collect();
        self.remember(&results);
        Ok(results)
    }

    /// Unknown vocabulary across `jobs`, reported when at least
    /// `min_frequency` jobs contain it.
    pub fn emerging_terms(
        &self,
        jobs: &[JobPosting],
        min_frequency: usize,
        limit: usize,
    ) -> TaxonResult<Vec<detector::EmergingTerm>> {
        let snapshot = self.usable_snapshot()?;
        let bundles: Vec<_> = jobs.iter().map(extract).collect();
        Ok(detector::detect_emerging_terms(
            &bundles,
            &snapshot,
            min_frequency,
            limit,
        ))
    }

    /// Most recent results, newest first.
    pub fn recent_results(&self, limit: usize) -> Vec<ClassificationResult> {
        self.history
            .lock()
            .map(|h| h.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    /// Every degradation recorded so far (fallbacks after scoring faults).
    pub fn degradations(&self) -> Vec<TrackedDegradation> {
        self.degradation
            .lock()
            .map(|t| t.events().to_vec())
            .unwrap_or_default()
    }

    fn usable_snapshot(&self) -> TaxonResult<Arc<DictionarySnapshot>> {
        let snapshot = self.dictionary.snapshot()?;
        if !snapshot.is_usable() {
            return Err(TaxonError::DictionaryUnavailable {
                reason: format!(
                    "snapshot v{} has no scoreable category",
                    snapshot.version()
                ),
            });
        }
        Ok(snapshot)
    }

    fn classify_guarded(&self, job: &JobPosting, snapshot: &DictionarySnapshot) -> ClassificationResult {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            classify_job(job, snapshot, &self.reference, self.scorer.as_ref(), &self.config)
        }));
        match outcome {
            Ok(result) => result,
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                events::fallback_used(&job.id, &reason);
                if let Ok(mut tracker) = self.degradation.lock() {
                    tracker.record(DegradationEvent::new(
                        COMPONENT,
                        format!("job {}: {reason}", job.id),
                        self.config.fallback_category.clone(),
                    ));
                }
                fallback_result(job, snapshot.version(), &self.config, &reason)
            }
        }
    }

    fn remember(&self, results: &[ClassificationResult]) {
        if self.history_cap == 0 {
            return;
        }
        let Ok(mut history) = self.history.lock() else {
            return;
        };
        for result in results {
            if history.len() >= self.history_cap {
                history.pop_front();
            }
            history.push_back(result.clone());
        }
    }
}

/// The pure classification pipeline for one job.
pub fn classify_job(
    job: &JobPosting,
    snapshot: &DictionarySnapshot,
    reference: &ReferenceData,
    scorer: &dyn CategoryScorer,
    config: &ScoringConfig,
) -> ClassificationResult {
    let bundle = extract(job);
    let emerging_terms = detector::emerging_terms(&bundle, snapshot, config.max_emerging_terms);

    if let LeadershipDecision::Override { trigger } = leadership::evaluate(job, &reference.leadership) {
        if snapshot.category(&config.leadership_category).is_some() {
            events::leadership_override(&job.id, &trigger.to_string());
            return ClassificationResult {
                job_id: job.id.clone(),
                primary: config.leadership_category.clone(),
                confidence: config.leadership_confidence,
                secondary: Vec::new(),
                flags: ClassificationFlags {
                    emerging_terms,
                    ..Default::default()
                },
                reasoning: vec![format!("leadership override: {trigger}")],
                source: ClassificationSource::LeadershipOverride,
                top_score: 0.0,
                dictionary_version: snapshot.version(),
            };
        }
        warn!(
            category = %config.leadership_category,
            "leadership category missing from dictionary, override skipped"
        );
    }

    let mut ranked = scorer.rank(&bundle, snapshot.categories(), job.affiliation.as_deref());
    // An explicit non-leadership grade rules leadership out entirely, even
    // when the title carries a leadership keyword.
    if job.explicit_grade().is_some() {
        ranked.retain(|s| s.category_id != config.leadership_category);
    }
    let Some(top) = ranked.first().filter(|t| t.score > 0.0) else {
        let result = ClassificationResult {
            job_id: job.id.clone(),
            primary: config.fallback_category.clone(),
            confidence: 0,
            secondary: Vec::new(),
            flags: ClassificationFlags {
                low_confidence: true,
                ambiguous: false,
                emerging_terms,
                hybrid: None,
            },
            reasoning: vec!["no keyword evidence for any category".to_string()],
            source: ClassificationSource::NoEvidence,
            top_score: 0.0,
            dictionary_version: snapshot.version(),
        };
        events::job_classified(&job.id, &result.primary, 0, "no_evidence");
        return result;
    };

    let secondary: Vec<SecondaryCandidate> = ranked
        .iter()
        .skip(1)
        .take(config.max_secondary)
        .filter(|s| s.score > config.secondary_min_score)
        .map(|s| SecondaryCandidate {
            category_id: s.category_id.clone(),
            confidence: clamp_confidence(s.score),
        })
        .collect();

    let ambiguous = detector::is_ambiguous(&ranked, config.ambiguity_threshold);
    let hybrid = detector::detect_hybrid(
        &ranked,
        &reference.hybrid_patterns,
        snapshot,
        config.hybrid_low_bound,
        config.hybrid_high_bound,
    );

    let mut reasoning: Vec<String> = top
        .reasons
        .iter()
        .map(|r| format!("{}: {r}", top.category_id))
        .collect();
    if ambiguous {
        if let Some(second) = ranked.get(1) {
            reasoning.push(format!(
                "ambiguous: {} and {} within {}",
                top.category_id, second.category_id, config.ambiguity_threshold
            ));
        }
    }
    if let Some(hybrid) = &hybrid {
        reasoning.push(format!("hybrid pattern: {}", hybrid.display_name));
    }

    let confidence = clamp_confidence(top.score);
    events::job_classified(&job.id, &top.category_id, confidence, "scored");
    ClassificationResult {
        job_id: job.id.clone(),
        primary: top.category_id.clone(),
        confidence,
        secondary,
        flags: ClassificationFlags {
            low_confidence: detector::is_low_confidence(top.score, config.medium_confidence),
            ambiguous,
            emerging_terms,
            hybrid,
        },
        reasoning,
        source: ClassificationSource::Scored,
        top_score: top.score,
        dictionary_version: snapshot.version(),
    }
}

fn fallback_result(
    job: &JobPosting,
    dictionary_version: u64,
    config: &ScoringConfig,
    reason: &str,
) -> ClassificationResult {
    ClassificationResult {
        job_id: job.id.clone(),
        primary: config.fallback_category.clone(),
        confidence: config.fallback_confidence,
        secondary: Vec::new(),
        flags: ClassificationFlags {
            low_confidence: true,
            ..Default::default()
        },
        reasoning: vec![format!(
            "classification failed ({reason}); fell back to '{}'",
            config.fallback_category
        )],
        source: ClassificationSource::Fallback,
        top_score: 0.0,
        dictionary_version,
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
