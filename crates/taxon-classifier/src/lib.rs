//! # taxon-classifier
//!
//! Classification pipeline:
//! extract → leadership override (short-circuit) → score → detect flags.
//! Every stage is pure given a dictionary snapshot, so batches run in
//! parallel against one shared snapshot.

pub mod detector;
pub mod engine;
pub mod extractor;
pub mod leadership;
pub mod scorer;

pub use detector::emerging::EmergingTerm;
pub use engine::{classify_job, Classifier};
pub use extractor::extract;
pub use leadership::{LeadershipDecision, LeadershipTrigger};
pub use scorer::{CategoryScore, CategoryScorer, KeywordScorer};
