//! Curated reference tables: leadership rules, hybrid patterns, affiliation
//! priors, forbidden keywords, and per-category domain-term lists.
//!
//! These are configuration, not something inferred from the dictionary.
//! They are loaded from TOML so they can be extended without code changes.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use regex::Regex;
use serde::{Deserialize, Serialize};

use taxon_core::errors::{DictionaryError, TaxonResult};
use taxon_core::models::normalize_phrase;
use taxon_core::text;

use crate::taxonomy::Taxonomy;

/// Grade patterns and title indicators for the leadership override.
#[derive(Debug, Clone)]
pub struct LeadershipRules {
    grade_patterns: Vec<Regex>,
    title_indicators: Vec<String>,
}

impl LeadershipRules {
    pub fn new(grade_patterns: &[String], title_indicators: &[String]) -> Result<Self, DictionaryError> {
        let grade_patterns = grade_patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| DictionaryError::InvalidReferenceData {
                    reason: format!("leadership grade pattern '{p}': {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            grade_patterns,
            title_indicators: title_indicators.iter().map(|t| normalize_phrase(t)).collect(),
        })
    }

    /// Whether an explicit grade denotes a leadership position.
    /// Grades are compared lowercased with all whitespace removed.
    pub fn is_leadership_grade(&self, grade: &str) -> bool {
        let normalized: String = grade
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        !normalized.is_empty() && self.grade_patterns.iter().any(|re| re.is_match(&normalized))
    }

    /// The first title indicator present in `title` as whole words.
    pub fn title_indicator(&self, title: &str) -> Option<&str> {
        let title = title.to_lowercase();
        self.title_indicators
            .iter()
            .find(|indicator| text::contains_whole_phrase(&title, indicator))
            .map(String::as_str)
    }
}

/// A named pairing of two categories that often co-occur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HybridPattern {
    pub id: String,
    pub categories: (String, String),
}

/// Additive scoring prior for an (affiliation, category) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliationPrior {
    pub affiliation: String,
    pub category: String,
}

/// Curated single terms and two-word phrases for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainTermList {
    pub terms: BTreeSet<String>,
    pub phrases: BTreeSet<String>,
}

/// How specific a keyword is to a category according to the curated lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specificity {
    /// Listed verbatim for the category.
    Exact,
    /// Overlaps a listed term or phrase of the category.
    Partial,
    /// Listed only for some other category.
    OtherCategory,
    /// Not listed anywhere.
    Unknown,
}

/// Per-category domain-term lists.
#[derive(Debug, Clone, Default)]
pub struct DomainTerms {
    lists: BTreeMap<String, DomainTermList>,
}

impl DomainTerms {
    pub fn new(lists: BTreeMap<String, DomainTermList>) -> Self {
        let lists = lists
            .into_iter()
            .map(|(id, list)| {
                let list = DomainTermList {
                    terms: list.terms.iter().map(|t| normalize_phrase(t)).collect(),
                    phrases: list.phrases.iter().map(|p| normalize_phrase(p)).collect(),
                };
                (id, list)
            })
            .collect();
        Self { lists }
    }

    pub fn list(&self, category_id: &str) -> Option<&DomainTermList> {
        self.lists.get(category_id)
    }

    pub fn category_ids(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }

    pub fn specificity(&self, category_id: &str, keyword: &str) -> Specificity {
        let keyword = normalize_phrase(keyword);
        if let Some(list) = self.lists.get(category_id) {
            if list.terms.contains(&keyword) || list.phrases.contains(&keyword) {
                return Specificity::Exact;
            }
            if is_partial(list, &keyword) {
                return Specificity::Partial;
            }
        }
        let elsewhere = self
            .lists
            .iter()
            .filter(|(id, _)| id.as_str() != category_id)
            .any(|(_, list)| list.terms.contains(&keyword) || list.phrases.contains(&keyword));
        if elsewhere {
            Specificity::OtherCategory
        } else {
            Specificity::Unknown
        }
    }

    /// Whether `word` is a listed term of the category.
    pub fn is_term(&self, category_id: &str, word: &str) -> bool {
        self.lists
            .get(category_id)
            .is_some_and(|l| l.terms.contains(word))
    }

    /// Whether `phrase` is a curated phrase of the category.
    pub fn is_phrase(&self, category_id: &str, phrase: &str) -> bool {
        self.lists
            .get(category_id)
            .is_some_and(|l| l.phrases.contains(&normalize_phrase(phrase)))
    }
}

// Multi-word keywords overlap when they contain a listed term as a word;
// single words overlap when one is a word-prefix of a listed phrase word
// or term (minimum four characters to avoid noise).
fn is_partial(list: &DomainTermList, keyword: &str) -> bool {
    if keyword.contains(' ') {
        return text::tokens(keyword).any(|w| list.terms.contains(w));
    }
    if keyword.len() < 4 {
        return false;
    }
    list.terms
        .iter()
        .chain(list.phrases.iter())
        .flat_map(|entry| text::tokens(entry))
        .filter(|w| w.len() >= 4)
        .any(|w| w != keyword && (w.starts_with(keyword) || keyword.starts_with(w)))
}

#[derive(Deserialize)]
struct RawLeadership {
    #[serde(default)]
    grade_patterns: Vec<String>,
    #[serde(default)]
    title_indicators: Vec<String>,
}

#[derive(Deserialize)]
struct RawHybridPattern {
    id: String,
    categories: [String; 2],
}

#[derive(Deserialize)]
struct RawReference {
    #[serde(default)]
    forbidden_keywords: Vec<String>,
    leadership: RawLeadership,
    #[serde(default)]
    hybrid_patterns: Vec<RawHybridPattern>,
    #[serde(default)]
    affiliations: Vec<AffiliationPrior>,
    #[serde(default)]
    domain_terms: BTreeMap<String, DomainTermList>,
}

/// All curated tables in one bundle, shared read-only by scorer and learner.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub leadership: LeadershipRules,
    pub hybrid_patterns: Vec<HybridPattern>,
    pub affiliations: Vec<AffiliationPrior>,
    pub domain_terms: DomainTerms,
    forbidden_keywords: HashSet<String>,
}

impl ReferenceData {
    pub fn from_toml(source: &str) -> TaxonResult<Self> {
        let raw: RawReference =
            toml::from_str(source).map_err(|e| DictionaryError::InvalidReferenceData {
                reason: e.to_string(),
            })?;
        let leadership = LeadershipRules::new(
            &raw.leadership.grade_patterns,
            &raw.leadership.title_indicators,
        )?;
        let hybrid_patterns = raw
            .hybrid_patterns
            .into_iter()
            .map(|p| {
                let [a, b] = p.categories;
                HybridPattern {
                    id: p.id,
                    categories: (a, b),
                }
            })
            .collect();
        let affiliations = raw
            .affiliations
            .into_iter()
            .map(|a| AffiliationPrior {
                affiliation: a.affiliation.trim().to_lowercase(),
                category: a.category,
            })
            .collect();
        Ok(Self {
            leadership,
            hybrid_patterns,
            affiliations,
            domain_terms: DomainTerms::new(raw.domain_terms),
            forbidden_keywords: raw
                .forbidden_keywords
                .iter()
                .map(|k| normalize_phrase(k))
                .collect(),
        })
    }

    pub fn is_forbidden(&self, keyword: &str) -> bool {
        self.forbidden_keywords.contains(keyword)
    }

    /// Categories receiving a prior for this affiliation.
    pub fn affiliated_categories<'a>(&'a self, affiliation: &str) -> impl Iterator<Item = &'a str> {
        let affiliation = affiliation.trim().to_lowercase();
        self.affiliations
            .iter()
            .filter(move |a| a.affiliation == affiliation)
            .map(|a| a.category.as_str())
    }

    /// Every category id referenced by a table must exist in the taxonomy.
    pub fn validate_against(&self, taxonomy: &Taxonomy) -> Result<(), DictionaryError> {
        let referenced = self
            .hybrid_patterns
            .iter()
            .flat_map(|p| [p.categories.0.as_str(), p.categories.1.as_str()])
            .chain(self.affiliations.iter().map(|a| a.category.as_str()))
            .chain(self.domain_terms.category_ids());
        for id in referenced {
            if taxonomy.get(id).is_none() {
                return Err(DictionaryError::InvalidReferenceData {
                    reason: format!("reference tables mention unknown category '{id}'"),
                });
            }
        }
        Ok(())
    }
}
