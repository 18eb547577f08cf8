mod config_error;
mod dictionary_error;
mod storage_error;
mod taxon_error;

pub use config_error::ConfigError;
pub use dictionary_error::DictionaryError;
pub use storage_error::StorageError;
pub use taxon_error::{TaxonError, TaxonResult};
