//! Weighted-keyword category scorer.
//!
//! Per scoreable category the score sums core and support hits per field,
//! context-pair bonuses, emerging and weak-signal hits in the combined text,
//! and an additive affiliation prior. Each keyword counts once per field.

use std::collections::BTreeSet;
use std::sync::Arc;

use taxon_core::config::ScoringConfig;
use taxon_core::models::{Category, ContentBundle};
use taxon_core::text;
use taxon_dictionary::ReferenceData;

/// Raw score of one category with the evidence behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub category_id: String,
    pub score: f64,
    pub reasons: Vec<String>,
}

/// Ranks categories for a content bundle, best first.
pub trait CategoryScorer: Send + Sync {
    fn rank(
        &self,
        bundle: &ContentBundle,
        categories: &[Category],
        affiliation: Option<&str>,
    ) -> Vec<CategoryScore>;
}

/// The default scorer driven by [`ScoringConfig`] weights.
pub struct KeywordScorer {
    config: ScoringConfig,
    reference: Arc<ReferenceData>,
}

impl KeywordScorer {
    pub fn new(config: ScoringConfig, reference: Arc<ReferenceData>) -> Self {
        Self { config, reference }
    }

    pub fn score(
        &self,
        category: &Category,
        bundle: &ContentBundle,
        affiliation: Option<&str>,
    ) -> CategoryScore {
        let cfg = &self.config;
        let mut score = 0.0;
        let mut reasons = Vec::new();

        let tiers = [
            ("core", &category.core, 1.0),
            ("support", &category.support, cfg.support_multiplier),
        ];
        for (tier, keywords, multiplier) in tiers {
            let hits = FieldHits::find(keywords, bundle);
            score += multiplier
                * (hits.labels.len() as f64 * cfg.core_label_weight
                    + hits.title.len() as f64 * cfg.core_title_weight * cfg.title_multiplier
                    + hits.description.len() as f64 * cfg.core_description_weight);
            hits.describe(tier, &mut reasons);
        }

        for pair in &category.context_pairs {
            if text::contains_phrase(&bundle.combined, pair.first())
                && text::contains_phrase(&bundle.combined, pair.second())
            {
                score += cfg.context_pair_bonus;
                reasons.push(format!("context pair: {pair}"));
            }
        }

        let emerging = combined_hits(&category.emerging, bundle);
        if !emerging.is_empty() {
            score += emerging.len() as f64 * cfg.emerging_weight;
            reasons.push(format!("emerging: {}", emerging.join(", ")));
        }

        let weak = combined_hits(&category.weak_signal, bundle);
        if !weak.is_empty() {
            score += weak.len() as f64 * cfg.weak_signal_weight;
            reasons.push(format!("weak signal: {}", weak.join(", ")));
        }

        if let Some(affiliation) = affiliation {
            let priors = self
                .reference
                .affiliated_categories(affiliation)
                .filter(|id| *id == category.id)
                .count();
            if priors > 0 {
                let boost = priors as f64 * cfg.affiliation_boost;
                score += boost;
                reasons.push(format!(
                    "affiliation prior: {} (+{boost})",
                    affiliation.trim().to_lowercase()
                ));
            }
        }

        CategoryScore {
            category_id: category.id.clone(),
            score: score.max(0.0),
            reasons,
        }
    }
}

impl CategoryScorer for KeywordScorer {
    fn rank(
        &self,
        bundle: &ContentBundle,
        categories: &[Category],
        affiliation: Option<&str>,
    ) -> Vec<CategoryScore> {
        let mut ranked: Vec<CategoryScore> = categories
            .iter()
            .filter(|c| c.is_scoreable())
            .map(|c| self.score(c, bundle, affiliation))
            .collect();
        sort_ranked(&mut ranked);
        ranked
    }
}

/// Score descending, then category id ascending.
pub fn sort_ranked(ranked: &mut [CategoryScore]) {
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.category_id.cmp(&b.category_id))
    });
}

struct FieldHits<'k> {
    labels: Vec<&'k str>,
    title: Vec<&'k str>,
    description: Vec<&'k str>,
}

impl<'k> FieldHits<'k> {
    fn find(keywords: &'k BTreeSet<String>, bundle: &ContentBundle) -> Self {
        let mut hits = Self {
            labels: Vec::new(),
            title: Vec::new(),
            description: Vec::new(),
        };
        for keyword in keywords {
            if bundle.labels.iter().any(|l| text::contains_phrase(l, keyword)) {
                hits.labels.push(keyword);
            }
            if text::contains_phrase(&bundle.title, keyword) {
                hits.title.push(keyword);
            }
            if text::contains_phrase(&bundle.description, keyword) {
                hits.description.push(keyword);
            }
        }
        hits
    }

    fn describe(&self, tier: &str, reasons: &mut Vec<String>) {
        for (field, hits) in [
            ("labels", &self.labels),
            ("title", &self.title),
            ("description", &self.description),
        ] {
            if !hits.is_empty() {
                reasons.push(format!("{tier} in {field}: {}", hits.join(", ")));
            }
        }
    }
}

fn combined_hits<'k>(keywords: &'k BTreeSet<String>, bundle: &ContentBundle) -> Vec<&'k str> {
    keywords
        .iter()
        .filter(|k| text::contains_phrase(&bundle.combined, k))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxon_core::models::KeywordTier;

    fn reference() -> Arc<ReferenceData> {
        Arc::new(
            ReferenceData::from_toml(
                r#"
[leadership]
[[affiliations]]
affiliation = "who"
category = "health"
"#,
            )
            .unwrap(),
        )
    }

    fn bundle(title: &str, description: &str, labels: &[&str]) -> ContentBundle {
        let labels: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        let combined = format!("{title} {description} {}", labels.join(" "));
        ContentBundle {
            title: title.to_string(),
            description: description.to_string(),
            labels,
            combined,
        }
    }

    #[test]
    fn field_weights_apply() {
        let scorer = KeywordScorer::new(ScoringConfig::default(), reference());
        let cat = Category::new("technology", "Technology")
            .with_keywords(KeywordTier::Core, ["software"])
            .with_keywords(KeywordTier::Support, ["python"]);
        let s = scorer.score(&cat, &bundle("software lead", "python and software", &["software"]), None);
        // label 12 + title 15 + description 5 + support description 2.5
        assert!((s.score - 34.5).abs() < 1e-9);
        assert!(s.reasons.iter().any(|r| r == "core in title: software"));
    }

    #[test]
    fn keyword_counts_once_per_field() {
        let scorer = KeywordScorer::new(ScoringConfig::default(), reference());
        let cat = Category::new("data", "Data").with_keywords(KeywordTier::Core, ["data"]);
        let s = scorer.score(&cat, &bundle("", "data data data", &[]), None);
        assert!((s.score - 5.0).abs() < 1e-9);
    }

    #[test]
    fn affiliation_prior_is_additive() {
        let scorer = KeywordScorer::new(ScoringConfig::default(), reference());
        let cat = Category::new("health", "Health").with_keywords(KeywordTier::Core, ["health"]);
        let b = bundle("nurse", "", &[]);
        assert_eq!(scorer.score(&cat, &b, None).score, 0.0);
        assert_eq!(scorer.score(&cat, &b, Some("WHO")).score, 10.0);
    }

    #[test]
    fn ties_break_by_id() {
        let scorer = KeywordScorer::new(ScoringConfig::default(), reference());
        let cats = vec![
            Category::new("zeta", "Z").with_keywords(KeywordTier::Core, ["audit"]),
            Category::new("alpha", "A").with_keywords(KeywordTier::Core, ["audit"]),
            Category::new("empty", "E"),
        ];
        let ranked = scorer.rank(&bundle("audit", "", &[]), &cats, None);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].category_id, "alpha");
        assert_eq!(ranked[1].category_id, "zeta");
    }
}
