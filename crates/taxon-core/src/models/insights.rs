use serde::{Deserialize, Serialize};

use super::{DictionaryUpdateSuggestion, LearningAction};

/// Historical accuracy for one originally-predicted category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAccuracy {
    pub category_id: String,
    pub total: usize,
    pub correct: usize,
    /// `correct / total`, in [0, 1].
    pub accuracy: f64,
}

/// A recurring (predicted → corrected) confusion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MisclassificationPattern {
    pub from_category: String,
    pub to_category: String,
    pub count: usize,
    /// Keywords that most often separated the two in corrected jobs.
    pub example_keywords: Vec<String>,
}

/// A keyword the history supports for a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordInsight {
    pub category_id: String,
    pub keyword: String,
    pub supporting_jobs: usize,
    pub specificity: f64,
}

/// Read-only aggregate view over retained feedback and actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningInsights {
    pub total_feedback: usize,
    /// In [0, 1]; 0 when there is no feedback.
    pub overall_accuracy: f64,
    pub category_accuracy: Vec<CategoryAccuracy>,
    pub misclassifications: Vec<MisclassificationPattern>,
    pub keyword_suggestions: Vec<KeywordInsight>,
    pub recent_actions: Vec<LearningAction>,
    pub pending_proposals: Vec<DictionaryUpdateSuggestion>,
}
