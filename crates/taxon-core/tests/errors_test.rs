use taxon_core::errors::*;

#[test]
fn dictionary_unavailable_carries_reason() {
    let err = TaxonError::DictionaryUnavailable {
        reason: "no scoreable categories".into(),
    };
    assert!(err.to_string().contains("no scoreable categories"));
}

#[test]
fn category_not_found_carries_id() {
    let err = TaxonError::CategoryNotFound {
        id: "astrology".into(),
    };
    assert!(err.to_string().contains("astrology"));
}

// --- From impls ---

#[test]
fn dictionary_error_converts_to_taxon_error() {
    let err: TaxonError = DictionaryError::UnknownCategory { id: "x".into() }.into();
    assert!(matches!(err, TaxonError::DictionaryError(_)));
}

#[test]
fn storage_error_converts_to_taxon_error() {
    let err: TaxonError = StorageError::SqliteError {
        message: "disk full".into(),
    }
    .into();
    assert!(matches!(err, TaxonError::StorageError(_)));
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn serde_error_converts_to_taxon_error() {
    let serde_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
    let err: TaxonError = serde_err.into();
    assert!(matches!(err, TaxonError::SerializationError(_)));
}
