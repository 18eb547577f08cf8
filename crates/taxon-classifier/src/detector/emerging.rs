//! Vocabulary-gap detection: words no category knows about yet.

use std::collections::{HashMap, HashSet};

use taxon_core::models::ContentBundle;
use taxon_core::text;
use taxon_dictionary::DictionarySnapshot;

/// A term seen across a corpus of jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergingTerm {
    pub term: String,
    /// Number of jobs containing the term.
    pub count: usize,
}

fn unknown_words<'a>(
    bundle: &'a ContentBundle,
    snapshot: &'a DictionarySnapshot,
) -> impl Iterator<Item = &'a str> + 'a {
    text::alphabetic_words(&bundle.combined)
        .filter(|w| w.chars().count() > 2)
        .filter(|w| !text::is_stop_word(w))
        .filter(move |w| !snapshot.is_known_word(w))
}

/// Unknown words of one job, first occurrence order, at most `limit`.
pub fn emerging_terms(bundle: &ContentBundle, snapshot: &DictionarySnapshot, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    unknown_words(bundle, snapshot)
        .filter(|w| seen.insert(*w))
        .take(limit)
        .map(str::to_string)
        .collect()
}

/// Corpus-level aggregation. Each job counts a term once; terms below
/// `min_frequency` are dropped. Sorted by count descending, then term.
pub fn detect_emerging_terms<'a, I>(
    bundles: I,
    snapshot: &DictionarySnapshot,
    min_frequency: usize,
    limit: usize,
) -> Vec<EmergingTerm>
where
    I: IntoIterator<Item = &'a ContentBundle>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for bundle in bundles {
        let unique: HashSet<&str> = unknown_words(bundle, snapshot).collect();
        for term in unique {
            *counts.entry(term.to_string()).or_default() += 1;
        }
    }

    let mut terms: Vec<EmergingTerm> = counts
        .into_iter()
        .filter(|(_, count)| *count >= min_frequency.max(1))
        .map(|(term, count)| EmergingTerm { term, count })
        .collect();
    terms.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.term.cmp(&b.term)));
    terms.truncate(limit);
    terms
}
