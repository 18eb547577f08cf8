/// Dictionary loading and mutation errors.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("dictionary snapshot corrupt: {details}")]
    Corrupt { details: String },

    #[error("unknown category: {id}")]
    UnknownCategory { id: String },

    #[error("duplicate category id: {id}")]
    DuplicateCategory { id: String },

    #[error("category {id} has no core keywords and cannot be scored")]
    NotScoreable { id: String },

    #[error("reference data invalid: {reason}")]
    InvalidReferenceData { reason: String },

    #[error("dictionary lock poisoned")]
    LockPoisoned,
}
