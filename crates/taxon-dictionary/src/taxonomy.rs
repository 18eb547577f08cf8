//! Validated, id-sorted set of categories.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use taxon_core::errors::{DictionaryError, TaxonResult};
use taxon_core::models::{normalize_phrase, Category, DictionaryUpdate};
use taxon_core::text;

/// The full category set. Categories are kept sorted by id so iteration
/// order, and therefore scoring tie-breaks, are deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Category>", into = "Vec<Category>")]
pub struct Taxonomy {
    categories: Vec<Category>,
}

#[derive(Deserialize)]
struct TaxonomyFile {
    categories: Vec<Category>,
}

impl Taxonomy {
    /// Normalize keywords and reject duplicate ids.
    pub fn from_categories(categories: Vec<Category>) -> Result<Self, DictionaryError> {
        let mut by_id = BTreeMap::new();
        for mut category in categories {
            category.normalize();
            if category.id.is_empty() {
                return Err(DictionaryError::Corrupt {
                    details: format!("category '{}' has an empty id", category.name),
                });
            }
            if by_id.contains_key(&category.id) {
                return Err(DictionaryError::DuplicateCategory { id: category.id });
            }
            by_id.insert(category.id.clone(), category);
        }
        Ok(Self {
            categories: by_id.into_values().collect(),
        })
    }

    /// Parse a `[[categories]]` TOML document.
    pub fn from_toml(source: &str) -> TaxonResult<Self> {
        let file: TaxonomyFile =
            toml::from_str(source).map_err(|e| DictionaryError::Corrupt {
                details: e.to_string(),
            })?;
        Ok(Self::from_categories(file.categories)?)
    }

    /// Parse the JSON form written by [`Taxonomy::to_json`].
    pub fn from_json(source: &str) -> Result<Self, DictionaryError> {
        serde_json::from_str(source).map_err(|e| DictionaryError::Corrupt {
            details: e.to_string(),
        })
    }

    pub fn to_json(&self) -> TaxonResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.position(id).map(|i| &self.categories[i])
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.categories
            .binary_search_by(|c| c.id.as_str().cmp(id))
            .ok()
    }

    /// Categories with at least one core keyword.
    pub fn scoreable(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.is_scoreable())
    }

    pub fn has_scoreable(&self) -> bool {
        self.scoreable().next().is_some()
    }

    /// Every individual word appearing in any keyword of any tier.
    pub fn vocabulary(&self) -> HashSet<String> {
        self.categories
            .iter()
            .flat_map(|c| c.all_keywords())
            .flat_map(text::tokens)
            .map(str::to_string)
            .collect()
    }

    /// Whether `update` is already reflected in the category.
    pub fn contains_update(&self, category_id: &str, update: &DictionaryUpdate) -> Result<bool, DictionaryError> {
        let category = self
            .get(category_id)
            .ok_or_else(|| DictionaryError::UnknownCategory {
                id: category_id.to_string(),
            })?;
        Ok(match update {
            DictionaryUpdate::Keyword { tier, keyword } => category
                .tier(*tier)
                .contains(&normalize_phrase(keyword)),
            DictionaryUpdate::ContextPair { pair } => category.context_pairs.contains(pair),
        })
    }

    /// Merge `update` into a category. Returns false when nothing changed.
    pub(crate) fn merge(&mut self, category_id: &str, update: &DictionaryUpdate) -> Result<bool, DictionaryError> {
        let idx = self
            .position(category_id)
            .ok_or_else(|| DictionaryError::UnknownCategory {
                id: category_id.to_string(),
            })?;
        let category = &mut self.categories[idx];
        let changed = match update {
            DictionaryUpdate::Keyword { tier, keyword } => category.insert_keyword(*tier, keyword),
            DictionaryUpdate::ContextPair { pair } => category.insert_context_pair(pair.clone()),
        };
        if changed {
            category.touch();
        }
        Ok(changed)
    }

    /// Content fingerprint over the serialized categories.
    pub fn fingerprint(&self) -> TaxonResult<String> {
        let bytes = serde_json::to_vec(&self.categories)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

impl TryFrom<Vec<Category>> for Taxonomy {
    type Error = DictionaryError;

    fn try_from(categories: Vec<Category>) -> Result<Self, Self::Error> {
        Self::from_categories(categories)
    }
}

impl From<Taxonomy> for Vec<Category> {
    fn from(taxonomy: Taxonomy) -> Self {
        taxonomy.categories
    }
}
