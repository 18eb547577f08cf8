// Single source of truth for all default values.
// Scoring weights and the thresholds compared against them are calibrated
// together; change them as a set.

// --- Scoring: field weights ---
pub const DEFAULT_CORE_LABEL_WEIGHT: f64 = 12.0;
pub const DEFAULT_CORE_TITLE_WEIGHT: f64 = 10.0;
pub const DEFAULT_CORE_DESCRIPTION_WEIGHT: f64 = 5.0;
pub const DEFAULT_TITLE_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_SUPPORT_MULTIPLIER: f64 = 0.5;
pub const DEFAULT_CONTEXT_PAIR_BONUS: f64 = 15.0;
pub const DEFAULT_EMERGING_WEIGHT: f64 = 8.0;
pub const DEFAULT_WEAK_SIGNAL_WEIGHT: f64 = 2.0;
pub const DEFAULT_AFFILIATION_BOOST: f64 = 10.0;

// --- Scoring: thresholds ---
pub const DEFAULT_AMBIGUITY_THRESHOLD: f64 = 10.0;
pub const DEFAULT_MEDIUM_CONFIDENCE: f64 = 40.0;
pub const DEFAULT_SECONDARY_MIN_SCORE: f64 = 30.0;
pub const DEFAULT_MAX_SECONDARY: usize = 3;
pub const DEFAULT_HYBRID_LOW_BOUND: f64 = 20.0;
pub const DEFAULT_HYBRID_HIGH_BOUND: f64 = 40.0;
pub const DEFAULT_MAX_EMERGING_TERMS: usize = 5;

// --- Scoring: fixed outcomes ---
pub const DEFAULT_LEADERSHIP_CONFIDENCE: u8 = 95;
pub const DEFAULT_FALLBACK_CONFIDENCE: u8 = 25;
pub const DEFAULT_LEADERSHIP_CATEGORY: &str = "leadership";
pub const DEFAULT_FALLBACK_CATEGORY: &str = "general";

// --- Learning ---
pub const DEFAULT_AUTO_APPLY_THRESHOLD: f64 = 0.8;
pub const DEFAULT_MIN_SUGGESTION_CONFIDENCE: f64 = 0.4;
pub const DEFAULT_MIN_SUPPORTING_FEEDBACK: usize = 3;
pub const DEFAULT_CORE_PROMOTION_THRESHOLD: f64 = 0.7;
pub const DEFAULT_SUPPORT_DIVISOR: f64 = 10.0;
pub const DEFAULT_CANDIDATE_MIN_SCORE: f64 = 0.5;
pub const DEFAULT_MAX_CANDIDATES_PER_JOB: usize = 10;
pub const DEFAULT_REINFORCEMENT_INCREMENT: f64 = 0.1;
pub const DEFAULT_SEED_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_GENERIC_CATEGORY_SPREAD: usize = 3;
pub const DEFAULT_INSIGHT_MIN_SUPPORTING_JOBS: usize = 2;

// --- Retention ---
pub const DEFAULT_FEEDBACK_HISTORY_CAP: usize = 200;
pub const DEFAULT_LEARNING_ACTION_CAP: usize = 100;
pub const DEFAULT_DICTIONARY_UPDATE_CAP: usize = 200;
pub const DEFAULT_CLASSIFICATION_HISTORY_CAP: usize = 500;
pub const DEFAULT_PROPOSAL_CAP: usize = 200;
pub const DEFAULT_LEARNED_PATTERN_CAP: usize = 5000;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "taxon.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_FLUSH_INTERVAL_SECS: u64 = 30;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
