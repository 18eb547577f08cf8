//! Casing, tokenization, and phrase matching shared by scoring and learning.
//!
//! Matching is deliberately simple: lowercase ASCII-insensitive comparison,
//! alphanumeric word boundaries, no stemming.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Common English and job-posting filler words ignored by term discovery
/// and keyword extraction.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "all", "also", "among", "an", "and", "any", "are",
    "as", "at", "be", "been", "being", "both", "but", "by", "can", "could", "did", "do", "does",
    "duties", "each", "etc", "for", "from", "further", "had", "has", "have", "he", "her", "his",
    "how", "including", "into", "is", "it", "its", "job", "may", "more", "most", "must", "new",
    "not", "of", "on", "one", "or", "other", "our", "out", "over", "per", "position", "post",
    "provide", "required", "requirements", "responsibilities", "role", "shall", "she", "should",
    "such", "than", "that", "the", "their", "them", "then", "there", "these", "they", "this",
    "those", "through", "to", "under", "until", "upon", "use", "using", "very", "was", "we",
    "well", "were", "what", "when", "where", "which", "while", "who", "will", "with", "within",
    "work", "working", "would", "years", "you", "your",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word)
}

/// Split lowercase text into alphanumeric tokens.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
}

/// Tokens made only of alphabetic characters.
pub fn alphabetic_words(text: &str) -> impl Iterator<Item = &str> {
    tokens(text).filter(|t| t.chars().all(char::is_alphabetic))
}

/// Whether `phrase` occurs in `haystack` starting on a word boundary.
///
/// Only the left edge is bounded, so "database" matches "databases" and
/// "develop" matches "developer", but "art" does not match "start".
/// Both arguments are expected to be lowercase already.
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    find_bounded(haystack, phrase, false)
}

/// Whether `phrase` occurs in `haystack` as whole words on both edges.
pub fn contains_whole_phrase(haystack: &str, phrase: &str) -> bool {
    find_bounded(haystack, phrase, true)
}

fn find_bounded(haystack: &str, phrase: &str, bound_right: bool) -> bool {
    if phrase.is_empty() {
        return false;
    }
    haystack.match_indices(phrase).any(|(start, _)| {
        let left_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let right_ok = !bound_right
            || haystack[start + phrase.len()..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric());
        left_ok && right_ok
    })
}
