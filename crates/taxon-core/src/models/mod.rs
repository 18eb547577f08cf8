//! Data model shared by the classifier and the learning loop.

mod category;
mod classification;
mod feedback;
mod insights;
mod job;
mod learning;
mod suggestion;

pub use category::{normalize_phrase, Category, ContextPair, KeywordTier};
pub use classification::{
    clamp_confidence, ClassificationFlags, ClassificationResult, ClassificationSource,
    HybridMatch, SecondaryCandidate,
};
pub use feedback::{FeedbackJob, FeedbackRecord, FeedbackStatus, Judgement, OriginalClassification};
pub use insights::{CategoryAccuracy, KeywordInsight, LearningInsights, MisclassificationPattern};
pub use job::{ContentBundle, JobPosting};
pub use learning::{
    ApplyOutcome, DictionaryUpdateRecord, LearnedPattern, LearningAction, LearningActionKind,
};
pub use suggestion::{DictionaryUpdate, DictionaryUpdateSuggestion, SuggestionAction};
