use super::{ConfigError, DictionaryError, StorageError};

/// Top-level error for every fallible Taxon operation.
#[derive(Debug, thiserror::Error)]
pub enum TaxonError {
    /// No usable category data: classification cannot proceed at all.
    #[error("dictionary unavailable: {reason}")]
    DictionaryUnavailable { reason: String },

    #[error("category not found: {id}")]
    CategoryNotFound { id: String },

    #[error("invalid feedback {feedback_id}: {reason}")]
    InvalidFeedback { feedback_id: String, reason: String },

    #[error("proposal not found: {key}")]
    ProposalNotFound { key: String },

    #[error("dictionary error: {0}")]
    DictionaryError(#[from] DictionaryError),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Convenience alias used across the workspace.
pub type TaxonResult<T> = Result<T, TaxonError>;
