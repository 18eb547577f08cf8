//! Raw keyword candidates with field weights.
//!
//! title words ×3, label words ×2, description words ×1, adjacent title
//! word pairs ×4. A word must be alphabetic, longer than three characters,
//! and neither a stop word nor forbidden.

use std::collections::BTreeMap;

use taxon_core::models::FeedbackJob;
use taxon_core::text;
use taxon_dictionary::ReferenceData;

pub const TITLE_WEIGHT: f64 = 3.0;
pub const LABEL_WEIGHT: f64 = 2.0;
pub const DESCRIPTION_WEIGHT: f64 = 1.0;
pub const TITLE_PHRASE_WEIGHT: f64 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub keyword: String,
    /// Highest field weight the keyword was found with.
    pub weight: f64,
    pub in_title: bool,
}

pub fn is_candidate_word(word: &str, reference: &ReferenceData) -> bool {
    word.chars().count() > 3
        && word.chars().all(char::is_alphabetic)
        && !text::is_stop_word(word)
        && !reference.is_forbidden(word)
}

/// Candidates in keyword order.
pub fn extract_candidates(job: &FeedbackJob, reference: &ReferenceData) -> Vec<Candidate> {
    let mut found: BTreeMap<String, Candidate> = BTreeMap::new();
    let mut add = |keyword: &str, weight: f64, in_title: bool| {
        found
            .entry(keyword.to_string())
            .and_modify(|c| {
                c.weight = c.weight.max(weight);
                c.in_title |= in_title;
            })
            .or_insert_with(|| Candidate {
                keyword: keyword.to_string(),
                weight,
                in_title,
            });
    };

    let title = job.title.to_lowercase();
    let title_words: Vec<&str> = text::alphabetic_words(&title).collect();
    for &word in &title_words {
        if is_candidate_word(word, reference) {
            add(word, TITLE_WEIGHT, true);
        }
    }
    for pair in title_words.windows(2) {
        if pair.iter().all(|w| is_candidate_word(w, reference)) {
            add(format!("{} {}", pair[0], pair[1]).as_str(), TITLE_PHRASE_WEIGHT, true);
        }
    }

    let labels = job.labels.to_lowercase();
    for word in text::alphabetic_words(&labels) {
        if is_candidate_word(word, reference) {
            add(word, LABEL_WEIGHT, false);
        }
    }

    let description = job.description.to_lowercase();
    for word in text::alphabetic_words(&description) {
        if is_candidate_word(word, reference) {
            add(word, DESCRIPTION_WEIGHT, false);
        }
    }

    found.into_values().collect()
}
