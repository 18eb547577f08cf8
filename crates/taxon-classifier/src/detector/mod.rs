//! Post-scoring analysis: ambiguity, low confidence, emerging vocabulary,
//! and registered hybrid patterns.

pub mod ambiguity;
pub mod emerging;
pub mod hybrid;

pub use ambiguity::{is_ambiguous, is_low_confidence};
pub use emerging::{detect_emerging_terms, emerging_terms, EmergingTerm};
pub use hybrid::detect_hybrid;
