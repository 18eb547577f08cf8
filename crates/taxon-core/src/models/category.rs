use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Strength tier of a category keyword, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordTier {
    Core,
    Support,
    Emerging,
    WeakSignal,
}

impl KeywordTier {
    pub const ALL: [KeywordTier; 4] = [
        KeywordTier::Core,
        KeywordTier::Support,
        KeywordTier::Emerging,
        KeywordTier::WeakSignal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Support => "support",
            Self::Emerging => "emerging",
            Self::WeakSignal => "weak_signal",
        }
    }
}

impl fmt::Display for KeywordTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two phrases whose joint presence earns a bonus.
///
/// Phrases are lowercased and stored in sorted order, so `(a, b)` and
/// `(b, a)` are the same pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct ContextPair {
    first: String,
    second: String,
}

impl ContextPair {
    pub fn new(a: impl AsRef<str>, b: impl AsRef<str>) -> Self {
        let a = normalize_phrase(a.as_ref());
        let b = normalize_phrase(b.as_ref());
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    /// Both phrases joined by a space, in stored order.
    pub fn joined(&self) -> String {
        format!("{} {}", self.first, self.second)
    }
}

impl From<(String, String)> for ContextPair {
    fn from((a, b): (String, String)) -> Self {
        Self::new(a, b)
    }
}

impl From<ContextPair> for (String, String) {
    fn from(pair: ContextPair) -> Self {
        (pair.first, pair.second)
    }
}

impl fmt::Display for ContextPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.first, self.second)
    }
}

/// A node of the job taxonomy with its tiered keyword sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub core: BTreeSet<String>,
    #[serde(default)]
    pub support: BTreeSet<String>,
    #[serde(default)]
    pub emerging: BTreeSet<String>,
    #[serde(default)]
    pub weak_signal: BTreeSet<String>,
    #[serde(default)]
    pub context_pairs: BTreeSet<ContextPair>,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: String::new(),
            description: String::new(),
            core: BTreeSet::new(),
            support: BTreeSet::new(),
            emerging: BTreeSet::new(),
            weak_signal: BTreeSet::new(),
            context_pairs: BTreeSet::new(),
            last_updated: Utc::now(),
        }
    }

    /// Builder helper used by seed data and tests.
    pub fn with_keywords<I, S>(mut self, tier: KeywordTier, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for keyword in keywords {
            self.insert_keyword(tier, keyword.as_ref());
        }
        self
    }

    pub fn with_context_pair(mut self, a: &str, b: &str) -> Self {
        self.context_pairs.insert(ContextPair::new(a, b));
        self
    }

    /// A category must have at least one core keyword to be scored.
    pub fn is_scoreable(&self) -> bool {
        !self.core.is_empty()
    }

    pub fn tier(&self, tier: KeywordTier) -> &BTreeSet<String> {
        match tier {
            KeywordTier::Core => &self.core,
            KeywordTier::Support => &self.support,
            KeywordTier::Emerging => &self.emerging,
            KeywordTier::WeakSignal => &self.weak_signal,
        }
    }

    fn tier_mut(&mut self, tier: KeywordTier) -> &mut BTreeSet<String> {
        match tier {
            KeywordTier::Core => &mut self.core,
            KeywordTier::Support => &mut self.support,
            KeywordTier::Emerging => &mut self.emerging,
            KeywordTier::WeakSignal => &mut self.weak_signal,
        }
    }

    /// Insert a keyword into a tier. Returns false when it was already there.
    pub fn insert_keyword(&mut self, tier: KeywordTier, keyword: &str) -> bool {
        let keyword = normalize_phrase(keyword);
        if keyword.is_empty() {
            return false;
        }
        self.tier_mut(tier).insert(keyword)
    }

    /// Insert a context pair. Returns false when it was already there.
    pub fn insert_context_pair(&mut self, pair: ContextPair) -> bool {
        self.context_pairs.insert(pair)
    }

    /// The strongest tier holding `keyword`, if any.
    pub fn tier_of(&self, keyword: &str) -> Option<KeywordTier> {
        let keyword = normalize_phrase(keyword);
        KeywordTier::ALL
            .into_iter()
            .find(|tier| self.tier(*tier).contains(&keyword))
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.tier_of(keyword).is_some()
    }

    /// Every keyword across all tiers.
    pub fn all_keywords(&self) -> impl Iterator<Item = &str> {
        KeywordTier::ALL
            .into_iter()
            .flat_map(move |tier| self.tier(tier).iter().map(String::as_str))
    }

    pub fn keyword_count(&self) -> usize {
        KeywordTier::ALL.iter().map(|t| self.tier(*t).len()).sum()
    }

    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }

    /// Re-normalize every keyword, e.g. after deserializing hand-written data.
    pub fn normalize(&mut self) {
        for tier in KeywordTier::ALL {
            let normalized: BTreeSet<String> = self
                .tier(tier)
                .iter()
                .map(|k| normalize_phrase(k))
                .filter(|k| !k.is_empty())
                .collect();
            *self.tier_mut(tier) = normalized;
        }
        self.id = self.id.trim().to_string();
    }
}

/// Lowercase, trim, and collapse inner whitespace.
pub fn normalize_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
