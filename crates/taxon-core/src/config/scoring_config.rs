use serde::{Deserialize, Serialize};

use super::defaults;

/// Weights and thresholds for the category scorer.
///
/// The scorer's raw score is unbounded, so every threshold here is expressed
/// in raw-score units and calibrated against the weights in the same struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Core keyword found in a job label.
    pub core_label_weight: f64,
    /// Core keyword found in the title (before the title multiplier).
    pub core_title_weight: f64,
    /// Core keyword found in the description.
    pub core_description_weight: f64,
    /// Extra multiplier applied to title hits.
    pub title_multiplier: f64,
    /// Support keywords score the core field weights times this.
    pub support_multiplier: f64,
    /// Bonus per context pair fully present in the combined text.
    pub context_pair_bonus: f64,
    /// Flat weight per emerging keyword hit.
    pub emerging_weight: f64,
    /// Flat weight per weak-signal keyword hit.
    pub weak_signal_weight: f64,
    /// Additive prior for a listed (affiliation, category) pair.
    pub affiliation_boost: f64,
    /// `top - second` at or below this marks the result ambiguous.
    pub ambiguity_threshold: f64,
    /// Top score below this marks the result low-confidence.
    pub medium_confidence: f64,
    /// Secondary candidates must score strictly above this.
    pub secondary_min_score: f64,
    /// Maximum number of secondary candidates.
    pub max_secondary: usize,
    /// Both hybrid categories must score above this.
    pub hybrid_low_bound: f64,
    /// At least one hybrid category must score above this.
    pub hybrid_high_bound: f64,
    /// Maximum emerging terms surfaced per job.
    pub max_emerging_terms: usize,
    /// Confidence assigned by the leadership override.
    pub leadership_confidence: u8,
    /// Confidence assigned to the fallback result.
    pub fallback_confidence: u8,
    /// Category forced by the leadership override.
    pub leadership_category: String,
    /// Generic category used when scoring fails or finds no evidence.
    pub fallback_category: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            core_label_weight: defaults::DEFAULT_CORE_LABEL_WEIGHT,
            core_title_weight: defaults::DEFAULT_CORE_TITLE_WEIGHT,
            core_description_weight: defaults::DEFAULT_CORE_DESCRIPTION_WEIGHT,
            title_multiplier: defaults::DEFAULT_TITLE_MULTIPLIER,
            support_multiplier: defaults::DEFAULT_SUPPORT_MULTIPLIER,
            context_pair_bonus: defaults::DEFAULT_CONTEXT_PAIR_BONUS,
            emerging_weight: defaults::DEFAULT_EMERGING_WEIGHT,
            weak_signal_weight: defaults::DEFAULT_WEAK_SIGNAL_WEIGHT,
            affiliation_boost: defaults::DEFAULT_AFFILIATION_BOOST,
            ambiguity_threshold: defaults::DEFAULT_AMBIGUITY_THRESHOLD,
            medium_confidence: defaults::DEFAULT_MEDIUM_CONFIDENCE,
            secondary_min_score: defaults::DEFAULT_SECONDARY_MIN_SCORE,
            max_secondary: defaults::DEFAULT_MAX_SECONDARY,
            hybrid_low_bound: defaults::DEFAULT_HYBRID_LOW_BOUND,
            hybrid_high_bound: defaults::DEFAULT_HYBRID_HIGH_BOUND,
            max_emerging_terms: defaults::DEFAULT_MAX_EMERGING_TERMS,
            leadership_confidence: defaults::DEFAULT_LEADERSHIP_CONFIDENCE,
            fallback_confidence: defaults::DEFAULT_FALLBACK_CONFIDENCE,
            leadership_category: defaults::DEFAULT_LEADERSHIP_CATEGORY.to_string(),
            fallback_category: defaults::DEFAULT_FALLBACK_CATEGORY.to_string(),
        }
    }
}
