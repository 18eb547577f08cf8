//! Span definitions per operation: classification, batch, feedback, approval.

/// Create a classification span.
#[macro_export]
macro_rules! classify_span {
    ($job_id:expr) => {
        tracing::info_span!("taxon.classify", job_id = %$job_id)
    };
}

/// Create a batch classification span.
#[macro_export]
macro_rules! batch_span {
    ($batch_size:expr) => {
        tracing::info_span!("taxon.classify_batch", batch_size = $batch_size)
    };
}

/// Create a feedback-processing span.
#[macro_export]
macro_rules! learning_span {
    ($feedback_id:expr, $kind:expr) => {
        tracing::info_span!("taxon.learning", feedback_id = %$feedback_id, kind = %$kind)
    };
}

/// Create a proposal-approval span.
#[macro_export]
macro_rules! approval_span {
    ($key:expr) => {
        tracing::info_span!("taxon.approval", key = %$key)
    };
}
