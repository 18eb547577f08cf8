use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClassificationResult, DictionaryUpdateSuggestion, JobPosting};

/// The human judgement attached to a reviewed classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Judgement {
    ConfirmedCorrect,
    Corrected { category_id: String },
}

/// Processing lifecycle of a feedback record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    Pending,
    Processed,
    Failed,
}

/// The job fields kept with a feedback record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackJob {
    pub id: String,
    pub title: String,
    pub description: String,
    pub labels: String,
}

impl From<&JobPosting> for FeedbackJob {
    fn from(job: &JobPosting) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            description: job.description.clone(),
            labels: job.labels.clone(),
        }
    }
}

/// What the classifier originally said about the job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginalClassification {
    pub primary: String,
    pub confidence: u8,
}

impl From<&ClassificationResult> for OriginalClassification {
    fn from(result: &ClassificationResult) -> Self {
        Self {
            primary: result.primary.clone(),
            confidence: result.confidence,
        }
    }
}

/// One human review action on one job's classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: String,
    pub job: FeedbackJob,
    pub original: OriginalClassification,
    pub judgement: Judgement,
    /// Filled during processing.
    #[serde(default)]
    pub extracted_keywords: Vec<String>,
    /// Filled during processing.
    #[serde(default)]
    pub suggestions: Vec<DictionaryUpdateSuggestion>,
    pub status: FeedbackStatus,
    pub recorded_at: DateTime<Utc>,
}

impl FeedbackRecord {
    pub fn new(job: FeedbackJob, original: OriginalClassification, judgement: Judgement) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            job,
            original,
            judgement,
            extracted_keywords: Vec::new(),
            suggestions: Vec::new(),
            status: FeedbackStatus::Pending,
            recorded_at: Utc::now(),
        }
    }

    /// A confirmation of `result` for `job`.
    pub fn confirm(job: &JobPosting, result: &ClassificationResult) -> Self {
        Self::new(job.into(), result.into(), Judgement::ConfirmedCorrect)
    }

    /// A correction of `result` for `job` to `category_id`.
    pub fn correct(job: &JobPosting, result: &ClassificationResult, category_id: &str) -> Self {
        Self::new(
            job.into(),
            result.into(),
            Judgement::Corrected {
                category_id: category_id.to_string(),
            },
        )
    }

    /// The category a human says this job belongs to.
    pub fn effective_category(&self) -> &str {
        match &self.judgement {
            Judgement::ConfirmedCorrect => &self.original.primary,
            Judgement::Corrected { category_id } => category_id,
        }
    }

    pub fn is_confirmation(&self) -> bool {
        matches!(self.judgement, Judgement::ConfirmedCorrect)
    }

    /// True when the original primary agreed with the human judgement.
    /// A "correction" to the same category counts as correct.
    pub fn was_correct(&self) -> bool {
        self.effective_category() == self.original.primary
    }

    /// Lowercase title, description, and labels joined for text matching.
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {} {}",
            self.job.title, self.job.description, self.job.labels
        )
        .to_lowercase()
    }
}
