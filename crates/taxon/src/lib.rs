//! # taxon
//!
//! Classifies job postings into a fixed taxonomy of functional categories
//! and learns new dictionary vocabulary from human feedback.
//!
//! [`TaxonRuntime`] wires the pieces together: one shared
//! [`DictionaryStore`], a [`Classifier`] and a [`LearningEngine`] reading
//! from it, and a key-value store behind a write-behind queue.

pub mod runtime;

pub use runtime::{RuntimeOptions, TaxonRuntime};

pub use taxon_classifier::{Classifier, EmergingTerm};
pub use taxon_core::config::TaxonConfig;
pub use taxon_core::errors::{TaxonError, TaxonResult};
pub use taxon_core::models;
pub use taxon_dictionary::{DictionaryStore, ReferenceData, Taxonomy};
pub use taxon_learning::LearningEngine;
pub use taxon_observability::{DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use taxon_storage::FlushReport;
