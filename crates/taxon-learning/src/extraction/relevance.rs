//! Category-specificity scoring for keyword candidates.

use std::collections::BTreeSet;

use taxon_core::config::LearningConfig;
use taxon_core::models::{FeedbackJob, FeedbackRecord};
use taxon_core::text;
use taxon_dictionary::{DictionarySnapshot, ReferenceData, Specificity};

use super::candidates::{extract_candidates, Candidate};

/// Field-weight contribution is `0.1 × weight`, capped here.
const MAX_WEIGHT_BONUS: f64 = 0.4;
const TITLE_BONUS: f64 = 0.25;
const DICTIONARY_BONUS: f64 = 0.15;
const SELECTIVITY_SCALE: f64 = 0.4;
const GENERIC_PENALTY: f64 = 0.15;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredKeyword {
    pub keyword: String,
    pub score: f64,
}

pub fn specificity_score(specificity: Specificity) -> f64 {
    match specificity {
        Specificity::Exact => 0.4,
        Specificity::Partial => 0.2,
        Specificity::OtherCategory => -0.2,
        Specificity::Unknown => 0.0,
    }
}

struct StatEntry {
    feedback_id: String,
    category: String,
    text: String,
}

/// How keywords are distributed over the retained feedback.
pub struct FeedbackStats {
    entries: Vec<StatEntry>,
}

/// Feedback records containing a keyword, split by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Occurrence {
    pub in_category: usize,
    pub in_other: usize,
    pub distinct_categories: usize,
}

impl FeedbackStats {
    pub fn new<'a, I>(history: I) -> Self
    where
        I: IntoIterator<Item = &'a FeedbackRecord>,
    {
        let entries = history
            .into_iter()
            .map(|r| StatEntry {
                feedback_id: r.id.clone(),
                category: r.effective_category().to_string(),
                text: r.searchable_text(),
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn occurrence(&self, keyword: &str, category_id: &str) -> Occurrence {
        let mut occurrence = Occurrence::default();
        let mut categories = BTreeSet::new();
        for entry in self.entries.iter().filter(|e| text::contains_phrase(&e.text, keyword)) {
            if entry.category == category_id {
                occurrence.in_category += 1;
            } else {
                occurrence.in_other += 1;
            }
            categories.insert(entry.category.as_str());
        }
        occurrence.distinct_categories = categories.len();
        occurrence
    }

    /// Ids of records assigned to `category_id` whose text contains every
    /// phrase in `phrases`.
    pub fn supporting(&self, category_id: &str, phrases: &[&str]) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.category == category_id)
            .filter(|e| phrases.iter().all(|p| text::contains_phrase(&e.text, p)))
            .map(|e| e.feedback_id.clone())
            .collect()
    }
}

/// Relevance of one candidate to `category_id`, clamped to [0, 1].
pub fn relevance(
    candidate: &Candidate,
    category_id: &str,
    snapshot: &DictionarySnapshot,
    reference: &ReferenceData,
    stats: &FeedbackStats,
    config: &LearningConfig,
) -> f64 {
    let mut score = (0.1 * candidate.weight).min(MAX_WEIGHT_BONUS);
    if candidate.in_title {
        score += TITLE_BONUS;
    }
    if snapshot
        .category(category_id)
        .is_some_and(|c| c.has_keyword(&candidate.keyword))
    {
        score += DICTIONARY_BONUS;
    }
    score += specificity_score(
        reference
            .domain_terms
            .specificity(category_id, &candidate.keyword),
    );

    let occurrence = stats.occurrence(&candidate.keyword, category_id);
    let seen = occurrence.in_category + occurrence.in_other;
    if seen > 0 {
        let share = occurrence.in_category as f64 / seen as f64;
        score += (share - 0.5) * SELECTIVITY_SCALE;
    }
    if occurrence.distinct_categories >= config.generic_category_spread {
        score -= GENERIC_PENALTY;
    }
    score.clamp(0.0, 1.0)
}

/// Candidates scoring above the configured minimum, best first (ties by
/// keyword), at most `max_candidates_per_job`.
pub fn extract_keywords(
    job: &FeedbackJob,
    category_id: &str,
    snapshot: &DictionarySnapshot,
    reference: &ReferenceData,
    stats: &FeedbackStats,
    config: &LearningConfig,
) -> Vec<ScoredKeyword> {
    let mut scored: Vec<ScoredKeyword> = extract_candidates(job, reference)
        .iter()
        .map(|c| ScoredKeyword {
            keyword: c.keyword.clone(),
            score: relevance(c, category_id, snapshot, reference, stats, config),
        })
        .filter(|k| k.score > config.candidate_min_score)
        .collect();
    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.keyword.cmp(&b.keyword))
    });
    scored.truncate(config.max_candidates_per_job);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxon_core::models::{Judgement, OriginalClassification};
    use taxon_dictionary::{default_reference, DictionaryStore};

    fn record(title: &str, category: &str) -> FeedbackRecord {
        FeedbackRecord::new(
            FeedbackJob {
                id: title.to_string(),
                title: title.to_string(),
                ..Default::default()
            },
            OriginalClassification {
                primary: "general".to_string(),
                confidence: 20,
            },
            Judgement::Corrected {
                category_id: category.to_string(),
            },
        )
    }

    #[test]
    fn exact_domain_term_in_title_scores_high() {
        let store = DictionaryStore::with_seed().unwrap();
        let snapshot = store.snapshot().unwrap();
        let reference = default_reference().unwrap();
        let history = vec![record("Blockchain Analyst", "technology")];
        let stats = FeedbackStats::new(&history);
        let keywords = extract_keywords(
            &history[0].job,
            "technology",
            &snapshot,
            &reference,
            &stats,
            &LearningConfig::default(),
        );
        assert_eq!(keywords[0].keyword, "blockchain");
        assert_eq!(keywords[0].score, 1.0);
    }

    #[test]
    fn generic_words_are_penalized() {
        let history = vec![
            record("Global Analyst", "technology"),
            record("Global Analyst", "finance"),
            record("Global Analyst", "health"),
        ];
        let stats = FeedbackStats::new(&history);
        let occurrence = stats.occurrence("global", "technology");
        assert_eq!(occurrence.in_category, 1);
        assert_eq!(occurrence.in_other, 2);
        assert_eq!(occurrence.distinct_categories, 3);

        let store = DictionaryStore::with_seed().unwrap();
        let snapshot = store.snapshot().unwrap();
        let candidate = Candidate {
            keyword: "global".to_string(),
            weight: 3.0,
            in_title: true,
        };
        let score = relevance(
            &candidate,
            "technology",
            &snapshot,
            &default_reference().unwrap(),
            &stats,
            &LearningConfig::default(),
        );
        // 0.3 + 0.25 + selectivity (1/3 - 0.5) * 0.4 - 0.15
        assert!((score - (0.55 - 0.2 / 3.0 - 0.15)).abs() < 1e-9);
    }

    #[test]
    fn supporting_requires_every_phrase() {
        let history = vec![
            record("Blockchain Developer", "technology"),
            record("Blockchain Analyst", "technology"),
            record("Blockchain Developer", "finance"),
        ];
        let stats = FeedbackStats::new(&history);
        assert_eq!(stats.supporting("technology", &["blockchain"]).len(), 2);
        assert_eq!(
            stats.supporting("technology", &["blockchain", "developer"]).len(),
            1
        );
    }
}
