use serde::{Deserialize, Serialize};

/// How the primary category was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    /// Normal weighted-keyword scoring.
    Scored,
    /// An explicit grade or title indicator forced the leadership category.
    LeadershipOverride,
    /// Scoring found no keyword evidence for any category.
    NoEvidence,
    /// Scoring failed internally; the generic fallback was substituted.
    Fallback,
}

/// A runner-up category that scored meaningfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryCandidate {
    pub category_id: String,
    pub confidence: u8,
}

/// A registered two-category pattern that fired for a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HybridMatch {
    pub pattern_id: String,
    pub categories: (String, String),
    /// `"<Name A> + <Name B>"`.
    pub display_name: String,
}

/// Post-scoring flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationFlags {
    pub low_confidence: bool,
    pub ambiguous: bool,
    pub emerging_terms: Vec<String>,
    pub hybrid: Option<HybridMatch>,
}

/// Outcome of one classification call. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub job_id: String,
    pub primary: String,
    /// Clamped to [0, 100].
    pub confidence: u8,
    /// At most three runner-ups, each scoring above the secondary floor.
    pub secondary: Vec<SecondaryCandidate>,
    pub flags: ClassificationFlags,
    pub reasoning: Vec<String>,
    pub source: ClassificationSource,
    /// Unclamped score of the primary category (0 for overrides and fallbacks).
    pub top_score: f64,
    /// Version of the dictionary snapshot the job was scored against.
    pub dictionary_version: u64,
}

impl ClassificationResult {
    pub fn hybrid_candidate(&self) -> bool {
        self.flags.hybrid.is_some()
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ClassificationSource::Fallback
    }
}

/// Clamp an unbounded raw score to the 0–100 confidence scale.
pub fn clamp_confidence(score: f64) -> u8 {
    if !score.is_finite() || score <= 0.0 {
        return 0;
    }
    score.round().min(100.0) as u8
}
