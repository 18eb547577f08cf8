//! # taxon-learning
//!
//! Turns human feedback on classifications into dictionary changes.
//!
//! feedback → keyword extraction → suggestions → auto-apply (≥ threshold)
//! or proposal queue → audit trail. Learning insights are a read-only view
//! over the retained history.

pub mod audit;
pub mod engine;
pub mod extraction;
pub mod feedback_processor;
pub mod insights;
pub mod patterns;
pub mod proposals;

pub use engine::LearningEngine;
pub use feedback_processor::{LearningContext, ProcessorOutput};
pub use patterns::LearnedPatternTable;
pub use proposals::ProposalQueue;
