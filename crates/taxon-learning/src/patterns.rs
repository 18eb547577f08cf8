//! Learned-pattern table: (category, keyword) → confidence, occurrences.

use chrono::Utc;
use dashmap::DashMap;

use taxon_core::config::defaults::DEFAULT_LEARNED_PATTERN_CAP;
use taxon_core::models::LearnedPattern;

type PatternKey = (String, String);

/// Concurrent map of reinforced keyword associations.
///
/// Bounded: once `cap` patterns are held, seeding a new one evicts the
/// weakest (lowest confidence, then least recently seen).
#[derive(Debug)]
pub struct LearnedPatternTable {
    patterns: DashMap<PatternKey, LearnedPattern>,
    cap: usize,
}

impl Default for LearnedPatternTable {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LEARNED_PATTERN_CAP)
    }
}

impl LearnedPatternTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            patterns: DashMap::new(),
            cap: cap.max(1),
        }
    }

    /// Strengthen an existing pattern by `increment` (capped at 1.0) or
    /// seed a new one at `seed`. Returns the resulting confidence.
    pub fn reinforce(&self, category_id: &str, keyword: &str, increment: f64, seed: f64) -> f64 {
        let now = Utc::now();
        let key = (category_id.to_string(), keyword.to_string());
        if let Some(mut p) = self.patterns.get_mut(&key) {
            p.confidence = (p.confidence + increment).min(1.0);
            p.occurrences = p.occurrences.saturating_add(1);
            p.last_seen = now;
            return p.confidence;
        }
        self.make_room();
        let entry = self.patterns.entry(key).or_insert_with(|| LearnedPattern {
            category_id: category_id.to_string(),
            keyword: keyword.to_string(),
            confidence: seed.clamp(0.0, 1.0),
            occurrences: 1,
            last_seen: now,
        });
        entry.confidence
    }

    pub fn get(&self, category_id: &str, keyword: &str) -> Option<LearnedPattern> {
        self.patterns
            .get(&(category_id.to_string(), keyword.to_string()))
            .map(|p| p.value().clone())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// All patterns ordered by category, then keyword.
    pub fn all(&self) -> Vec<LearnedPattern> {
        let mut all: Vec<LearnedPattern> = self.patterns.iter().map(|p| p.value().clone()).collect();
        all.sort_by(|a, b| {
            a.category_id
                .cmp(&b.category_id)
                .then_with(|| a.keyword.cmp(&b.keyword))
        });
        all
    }

    /// Swap in a restored set, keeping the strongest `cap` patterns.
    pub fn replace(&self, mut patterns: Vec<LearnedPattern>) {
        patterns.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| b.last_seen.cmp(&a.last_seen))
        });
        patterns.truncate(self.cap);
        self.patterns.clear();
        for p in patterns {
            self.patterns
                .insert((p.category_id.clone(), p.keyword.clone()), p);
        }
    }

    fn make_room(&self) {
        while self.patterns.len() >= self.cap {
            let victim = self
                .patterns
                .iter()
                .min_by(|a, b| {
                    a.confidence
                        .total_cmp(&b.confidence)
                        .then_with(|| a.last_seen.cmp(&b.last_seen))
                })
                .map(|p| p.key().clone());
            match victim {
                Some(key) => {
                    self.patterns.remove(&key);
                }
                None => break,
            }
        }
    }
}
