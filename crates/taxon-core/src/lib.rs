//! # taxon-core
//!
//! Foundation crate for the Taxon job classifier.
//! Defines the data model, config, errors, text utilities, and the
//! persistence trait. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod text;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::TaxonConfig;
pub use errors::{TaxonError, TaxonResult};
pub use models::{
    Category, ClassificationResult, ContentBundle, ContextPair, DictionaryUpdate,
    DictionaryUpdateSuggestion, FeedbackRecord, JobPosting, Judgement, KeywordTier,
    LearningAction, LearningActionKind,
};
pub use traits::KeyValueStore;
