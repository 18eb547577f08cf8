//! # taxon-dictionary
//!
//! The category dictionary: a validated [`Taxonomy`], the [`DictionaryStore`]
//! that hands out immutable snapshots and serializes merge-only writes, and
//! the curated [`ReferenceData`] tables (leadership rules, hybrid patterns,
//! affiliation priors, domain-term lists).

pub mod reference;
pub mod seed;
pub mod store;
pub mod taxonomy;

pub use reference::{
    AffiliationPrior, DomainTermList, DomainTerms, HybridPattern, LeadershipRules, ReferenceData,
    Specificity,
};
pub use seed::{default_reference, default_taxonomy};
pub use store::{DictionarySnapshot, DictionaryStore};
pub use taxonomy::Taxonomy;
