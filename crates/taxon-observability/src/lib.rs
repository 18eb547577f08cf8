//! # taxon-observability
//!
//! Structured logging for classification and learning, plus a tracker for
//! degraded operation (fallback classifications, failed persistence).

pub mod degradation;
pub mod tracing_setup;

pub use degradation::{DegradationEvent, DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
