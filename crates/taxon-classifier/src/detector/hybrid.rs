use std::collections::HashMap;

use taxon_core::models::HybridMatch;
use taxon_dictionary::{DictionarySnapshot, HybridPattern};

use crate::scorer::CategoryScore;

/// First registered pattern whose categories both score above `low` with
/// at least one above `high`.
pub fn detect_hybrid(
    ranked: &[CategoryScore],
    patterns: &[HybridPattern],
    snapshot: &DictionarySnapshot,
    low: f64,
    high: f64,
) -> Option<HybridMatch> {
    let scores: HashMap<&str, f64> = ranked
        .iter()
        .map(|s| (s.category_id.as_str(), s.score))
        .collect();

    patterns.iter().find_map(|pattern| {
        let (a, b) = &pattern.categories;
        let sa = scores.get(a.as_str()).copied().unwrap_or(0.0);
        let sb = scores.get(b.as_str()).copied().unwrap_or(0.0);
        if sa > low && sb > low && (sa > high || sb > high) {
            Some(HybridMatch {
                pattern_id: pattern.id.clone(),
                categories: (a.clone(), b.clone()),
                display_name: format!("{} + {}", display_name(snapshot, a), display_name(snapshot, b)),
            })
        } else {
            None
        }
    })
}

fn display_name<'a>(snapshot: &'a DictionarySnapshot, id: &'a str) -> &'a str {
    snapshot
        .category(id)
        .map(|c| c.name.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(id)
}
