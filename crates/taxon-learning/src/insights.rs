//! Read-only learning report over the retained feedback and audit trail.

use std::collections::{BTreeMap, BTreeSet};

use taxon_core::config::LearningConfig;
use taxon_core::models::{
    CategoryAccuracy, DictionaryUpdateSuggestion, FeedbackRecord, KeywordInsight, LearningAction,
    LearningInsights, MisclassificationPattern,
};
use taxon_dictionary::{DictionarySnapshot, ReferenceData};

use crate::extraction::specificity_score;

const EXAMPLE_KEYWORDS: usize = 3;

pub struct InsightSources<'a> {
    pub history: &'a [FeedbackRecord],
    pub recent_actions: Vec<LearningAction>,
    pub pending_proposals: Vec<DictionaryUpdateSuggestion>,
    pub snapshot: &'a DictionarySnapshot,
    pub reference: &'a ReferenceData,
    pub config: &'a LearningConfig,
}

pub fn compute(sources: InsightSources<'_>, limit: usize) -> LearningInsights {
    let history = sources.history;
    let total = history.len();
    let correct = history.iter().filter(|r| r.was_correct()).count();

    LearningInsights {
        total_feedback: total,
        overall_accuracy: ratio(correct, total),
        category_accuracy: category_accuracy(history),
        misclassifications: misclassifications(history, limit),
        keyword_suggestions: keyword_suggestions(&sources, limit),
        recent_actions: sources.recent_actions,
        pending_proposals: sources.pending_proposals,
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Accuracy of the original classification, grouped by what was predicted.
fn category_accuracy(history: &[FeedbackRecord]) -> Vec<CategoryAccuracy> {
    let mut groups: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for record in history {
        let entry = groups.entry(record.original.primary.as_str()).or_default();
        entry.0 += 1;
        if record.was_correct() {
            entry.1 += 1;
        }
    }
    groups
        .into_iter()
        .map(|(id, (total, correct))| CategoryAccuracy {
            category_id: id.to_string(),
            total,
            correct,
            accuracy: ratio(correct, total),
        })
        .collect()
}

fn misclassifications(history: &[FeedbackRecord], limit: usize) -> Vec<MisclassificationPattern> {
    let mut groups: BTreeMap<(&str, &str), Vec<&FeedbackRecord>> = BTreeMap::new();
    for record in history.iter().filter(|r| !r.was_correct()) {
        groups
            .entry((record.original.primary.as_str(), record.effective_category()))
            .or_default()
            .push(record);
    }

    let mut patterns: Vec<MisclassificationPattern> = groups
        .into_iter()
        .map(|((from, to), records)| {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for keyword in records.iter().flat_map(|r| r.extracted_keywords.iter()) {
                *counts.entry(keyword.as_str()).or_default() += 1;
            }
            let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            MisclassificationPattern {
                from_category: from.to_string(),
                to_category: to.to_string(),
                count: records.len(),
                example_keywords: ranked
                    .into_iter()
                    .take(EXAMPLE_KEYWORDS)
                    .map(|(k, _)| k.to_string())
                    .collect(),
            }
        })
        .collect();
    patterns.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.from_category.cmp(&b.from_category))
            .then_with(|| a.to_category.cmp(&b.to_category))
    });
    patterns.truncate(limit);
    patterns
}

/// Keywords repeatedly extracted for a category that the dictionary does
/// not know yet, filtered by positive specificity and minimum support.
fn keyword_suggestions(sources: &InsightSources<'_>, limit: usize) -> Vec<KeywordInsight> {
    let mut jobs: BTreeMap<(&str, &str), BTreeSet<&str>> = BTreeMap::new();
    for record in sources.history {
        for keyword in &record.extracted_keywords {
            jobs.entry((record.effective_category(), keyword.as_str()))
                .or_default()
                .insert(record.job.id.as_str());
        }
    }

    let mut insights: Vec<KeywordInsight> = jobs
        .into_iter()
        .filter(|((category, keyword), _)| {
            !sources
                .snapshot
                .category(category)
                .is_some_and(|c| c.has_keyword(keyword))
        })
        .filter_map(|((category, keyword), job_ids)| {
            let specificity = specificity_score(
                sources
                    .reference
                    .domain_terms
                    .specificity(category, keyword),
            );
            let supporting_jobs = job_ids.len();
            (specificity > 0.0 && supporting_jobs >= sources.config.insight_min_supporting_jobs)
                .then(|| KeywordInsight {
                    category_id: category.to_string(),
                    keyword: keyword.to_string(),
                    supporting_jobs,
                    specificity,
                })
        })
        .collect();
    insights.sort_by(|a, b| {
        b.supporting_jobs
            .cmp(&a.supporting_jobs)
            .then_with(|| b.specificity.total_cmp(&a.specificity))
            .then_with(|| a.keyword.cmp(&b.keyword))
    });
    insights.truncate(limit);
    insights
}
