use taxon_core::models::{ContextPair, FeedbackJob};
use taxon_core::text;

/// Two-word context pairs: adjacent title words and two-word labels.
/// Each pair keeps its original word order in `.0` for phrase lookups.
pub fn candidate_pairs(job: &FeedbackJob) -> Vec<(String, ContextPair)> {
    let mut pairs: Vec<(String, ContextPair)> = Vec::new();
    let mut push = |a: &str, b: &str| {
        let pair = ContextPair::new(a, b);
        if !pairs.iter().any(|(_, p)| *p == pair) {
            pairs.push((format!("{a} {b}"), pair));
        }
    };

    let title = job.title.to_lowercase();
    let words: Vec<&str> = text::alphabetic_words(&title)
        .filter(|w| w.len() > 2 && !text::is_stop_word(w))
        .collect();
    for window in words.windows(2) {
        push(window[0], window[1]);
    }

    for label in job.labels.to_lowercase().split(',') {
        let words: Vec<&str> = text::alphabetic_words(label).collect();
        if let [a, b] = words.as_slice() {
            push(*a, *b);
        }
    }
    pairs
}
