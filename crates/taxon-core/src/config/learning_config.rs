use serde::{Deserialize, Serialize};

use super::defaults;

/// Feedback processing and dictionary-learning configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Suggestions at or above this confidence are applied immediately.
    pub auto_apply_threshold: f64,
    /// Suggestions below this confidence are discarded.
    pub min_suggestion_confidence: f64,
    /// Minimum supporting feedback records before a keyword is suggested.
    pub min_supporting_feedback: usize,
    /// Confidence above which a keyword is proposed for the core tier.
    pub core_promotion_threshold: f64,
    /// Supporting count divided by this gives suggestion confidence.
    pub support_divisor: f64,
    /// Extraction keeps only candidates scoring above this.
    pub candidate_min_score: f64,
    /// Maximum candidates kept per job.
    pub max_candidates_per_job: usize,
    /// Confidence added to a learned pattern on confirmation.
    pub reinforcement_increment: f64,
    /// Confidence of a newly seeded learned pattern.
    pub seed_confidence: f64,
    /// Keywords seen in feedback for this many categories count as generic.
    pub generic_category_spread: usize,
    /// Minimum supporting jobs for a keyword to appear in insights.
    pub insight_min_supporting_jobs: usize,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            auto_apply_threshold: defaults::DEFAULT_AUTO_APPLY_THRESHOLD,
            min_suggestion_confidence: defaults::DEFAULT_MIN_SUGGESTION_CONFIDENCE,
            min_supporting_feedback: defaults::DEFAULT_MIN_SUPPORTING_FEEDBACK,
            core_promotion_threshold: defaults::DEFAULT_CORE_PROMOTION_THRESHOLD,
            support_divisor: defaults::DEFAULT_SUPPORT_DIVISOR,
            candidate_min_score: defaults::DEFAULT_CANDIDATE_MIN_SCORE,
            max_candidates_per_job: defaults::DEFAULT_MAX_CANDIDATES_PER_JOB,
            reinforcement_increment: defaults::DEFAULT_REINFORCEMENT_INCREMENT,
            seed_confidence: defaults::DEFAULT_SEED_CONFIDENCE,
            generic_category_spread: defaults::DEFAULT_GENERIC_CATEGORY_SPREAD,
            insight_min_supporting_jobs: defaults::DEFAULT_INSIGHT_MIN_SUPPORTING_JOBS,
        }
    }
}
