//! Keyword and context-pair extraction from feedback jobs.

pub mod candidates;
pub mod pairs;
pub mod relevance;

pub use candidates::{extract_candidates, Candidate};
pub use pairs::candidate_pairs;
pub use relevance::{extract_keywords, specificity_score, FeedbackStats, ScoredKeyword};
