use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DictionaryUpdate;

/// Type of an audit-trail entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningActionKind {
    KeywordAddition,
    PatternRecognition,
    CategoryUpdate,
    PositiveReinforcement,
}

/// Append-only audit record of something the learning loop did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningAction {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: LearningActionKind,
    pub category_id: String,
    pub description: String,
    pub confidence: f64,
    pub supporting_job_ids: Vec<String>,
    pub auto_applied: bool,
}

impl LearningAction {
    pub fn new(
        kind: LearningActionKind,
        category_id: impl Into<String>,
        description: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            kind,
            category_id: category_id.into(),
            description: description.into(),
            confidence: confidence.clamp(0.0, 1.0),
            supporting_job_ids: Vec::new(),
            auto_applied: false,
        }
    }

    pub fn with_jobs(mut self, job_ids: Vec<String>) -> Self {
        self.supporting_job_ids = job_ids;
        self
    }

    pub fn applied(mut self) -> Self {
        self.auto_applied = true;
        self
    }
}

/// A (category, keyword) association reinforced by feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedPattern {
    pub category_id: String,
    pub keyword: String,
    /// In [0, 1].
    pub confidence: f64,
    pub occurrences: u32,
    pub last_seen: DateTime<Utc>,
}

/// Result of merging one update into the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyOutcome {
    Applied,
    AlreadyPresent,
}

/// Audit entry for one dictionary merge attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryUpdateRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub category_id: String,
    pub update: DictionaryUpdate,
    pub outcome: ApplyOutcome,
    pub confidence: f64,
    pub source_feedback_ids: Vec<String>,
    /// Dictionary version after the merge.
    pub dictionary_version: u64,
}
