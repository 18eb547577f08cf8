//! Built-in taxonomy and reference tables, compiled into the binary.

use taxon_core::errors::TaxonResult;

use crate::reference::ReferenceData;
use crate::taxonomy::Taxonomy;

const TAXONOMY_TOML: &str = include_str!("../data/taxonomy.toml");
const REFERENCE_TOML: &str = include_str!("../data/reference.toml");

/// The seed taxonomy used when no persisted dictionary exists.
pub fn default_taxonomy() -> TaxonResult<Taxonomy> {
    Taxonomy::from_toml(TAXONOMY_TOML)
}

/// The curated reference tables shipped with the crate.
pub fn default_reference() -> TaxonResult<ReferenceData> {
    ReferenceData::from_toml(REFERENCE_TOML)
}
