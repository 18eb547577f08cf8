use serde::{Deserialize, Serialize};

use super::{ContextPair, KeywordTier};

/// Kind of dictionary change a suggestion proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionAction {
    AddCoreKeyword,
    AddSupportKeyword,
    AddContextPair,
}

/// A single merge into a category's keyword data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DictionaryUpdate {
    Keyword { tier: KeywordTier, keyword: String },
    ContextPair { pair: ContextPair },
}

impl DictionaryUpdate {
    pub fn keyword(tier: KeywordTier, keyword: impl Into<String>) -> Self {
        Self::Keyword {
            tier,
            keyword: keyword.into(),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Keyword { tier, keyword } => format!("{tier} keyword '{keyword}'"),
            Self::ContextPair { pair } => format!("context pair '{pair}'"),
        }
    }
}

/// A proposed dictionary change derived from feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryUpdateSuggestion {
    pub category_id: String,
    pub action: SuggestionAction,
    pub update: DictionaryUpdate,
    /// In [0, 1].
    pub confidence: f64,
    pub supporting_feedback_ids: Vec<String>,
    pub frequency: usize,
}

impl DictionaryUpdateSuggestion {
    /// Identity used to merge repeated proposals of the same change.
    pub fn key(&self) -> String {
        match &self.update {
            DictionaryUpdate::Keyword { keyword, .. } => {
                format!("{}:keyword:{}", self.category_id, keyword)
            }
            DictionaryUpdate::ContextPair { pair } => {
                format!("{}:pair:{}", self.category_id, pair.joined())
            }
        }
    }
}
