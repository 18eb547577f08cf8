use crate::scorer::CategoryScore;

/// Top two raw scores within `threshold` of each other.
/// A single scored category is never ambiguous.
pub fn is_ambiguous(ranked: &[CategoryScore], threshold: f64) -> bool {
    match (ranked.first(), ranked.get(1)) {
        (Some(top), Some(second)) => top.score - second.score <= threshold,
        _ => false,
    }
}

pub fn is_low_confidence(top_score: f64, medium_confidence: f64) -> bool {
    top_score < medium_confidence
}
