//! Process feedback: confirmation → reinforcement, correction → suggestions.
//!
//! The processor is pure apart from the learned-pattern table: it never
//! touches the dictionary. Deciding what to apply is the engine's job.

use taxon_core::config::LearningConfig;
use taxon_core::models::{
    Category, ContextPair, DictionaryUpdate, DictionaryUpdateSuggestion, FeedbackRecord,
    Judgement, KeywordTier, LearningAction, LearningActionKind, SuggestionAction,
};
use taxon_core::text;
use taxon_dictionary::{DictionarySnapshot, ReferenceData};
use taxon_observability::tracing_setup::events;

use crate::extraction::{candidate_pairs, extract_keywords, FeedbackStats, ScoredKeyword};
use crate::patterns::LearnedPatternTable;

/// Read-only inputs shared by both feedback paths.
pub struct LearningContext<'a> {
    pub snapshot: &'a DictionarySnapshot,
    pub reference: &'a ReferenceData,
    /// Retained feedback, including the record being processed.
    pub stats: &'a FeedbackStats,
    pub config: &'a LearningConfig,
}

#[derive(Debug, Clone)]
pub struct ProcessorOutput {
    pub extracted_keywords: Vec<ScoredKeyword>,
    /// Suggestions at or above the minimum confidence.
    pub suggestions: Vec<DictionaryUpdateSuggestion>,
    /// Suggestions dropped for falling below the minimum confidence.
    pub discarded: usize,
    pub action: LearningAction,
}

pub fn process(
    record: &FeedbackRecord,
    ctx: &LearningContext<'_>,
    patterns: &LearnedPatternTable,
) -> ProcessorOutput {
    match &record.judgement {
        Judgement::ConfirmedCorrect => reinforce(record, ctx, patterns),
        Judgement::Corrected { category_id } => correct(record, category_id, ctx, patterns),
    }
}

fn reinforce(
    record: &FeedbackRecord,
    ctx: &LearningContext<'_>,
    patterns: &LearnedPatternTable,
) -> ProcessorOutput {
    let category_id = record.original.primary.as_str();
    let keywords = extract_keywords(
        &record.job,
        category_id,
        ctx.snapshot,
        ctx.reference,
        ctx.stats,
        ctx.config,
    );
    for keyword in &keywords {
        patterns.reinforce(
            category_id,
            &keyword.keyword,
            ctx.config.reinforcement_increment,
            ctx.config.seed_confidence,
        );
    }

    let action = LearningAction::new(
        LearningActionKind::PositiveReinforcement,
        category_id,
        format!(
            "confirmed '{category_id}': reinforced {} keyword(s)",
            keywords.len()
        ),
        f64::from(record.original.confidence) / 100.0,
    )
    .with_jobs(vec![record.job.id.clone()]);

    ProcessorOutput {
        extracted_keywords: keywords,
        suggestions: Vec::new(),
        discarded: 0,
        action,
    }
}

fn correct(
    record: &FeedbackRecord,
    target: &str,
    ctx: &LearningContext<'_>,
    patterns: &LearnedPatternTable,
) -> ProcessorOutput {
    let cfg = ctx.config;
    let keywords = extract_keywords(&record.job, target, ctx.snapshot, ctx.reference, ctx.stats, cfg);
    let mut collector = SuggestionCollector::new(target, cfg);

    if let Some(category) = ctx.snapshot.category(target) {
        for keyword in &keywords {
            let keyword = keyword.keyword.as_str();
            patterns.reinforce(target, keyword, cfg.reinforcement_increment, cfg.seed_confidence);
            if category.core.contains(keyword) {
                continue;
            }
            let supporting = ctx.stats.supporting(target, &[keyword]);
            let Some(confidence) = collector.supported_confidence(supporting.len()) else {
                continue;
            };
            let (action, tier) = if confidence > cfg.core_promotion_threshold {
                (SuggestionAction::AddCoreKeyword, KeywordTier::Core)
            } else {
                (SuggestionAction::AddSupportKeyword, KeywordTier::Support)
            };
            if tier == KeywordTier::Support && category.has_keyword(keyword) {
                continue;
            }
            collector.offer(action, DictionaryUpdate::keyword(tier, keyword), confidence, supporting);
        }

        for (phrase, pair) in candidate_pairs(&record.job) {
            if category.context_pairs.contains(&pair)
                || !is_category_specific(category, ctx.reference, &phrase, &pair)
            {
                continue;
            }
            let supporting = ctx.stats.supporting(target, &[pair.first(), pair.second()]);
            let Some(confidence) = collector.supported_confidence(supporting.len()) else {
                continue;
            };
            collector.offer(
                SuggestionAction::AddContextPair,
                DictionaryUpdate::ContextPair { pair },
                confidence,
                supporting,
            );
        }
    }

    let (suggestions, discarded) = collector.finish();
    let best = suggestions
        .iter()
        .map(|s| s.confidence)
        .fold(0.0_f64, f64::max);
    let action = LearningAction::new(
        LearningActionKind::PatternRecognition,
        target,
        format!(
            "corrected '{}' to '{target}': {} keyword(s), {} suggestion(s)",
            record.original.primary,
            keywords.len(),
            suggestions.len()
        ),
        best,
    )
    .with_jobs(vec![record.job.id.clone()]);

    ProcessorOutput {
        extracted_keywords: keywords,
        suggestions,
        discarded,
        action,
    }
}

/// A pair is category-specific when one of its words is already associated
/// with the category and the pair is a curated phrase of that category.
fn is_category_specific(
    category: &Category,
    reference: &ReferenceData,
    phrase: &str,
    pair: &ContextPair,
) -> bool {
    let associated = |word: &str| {
        reference.domain_terms.is_term(&category.id, word)
            || category
                .all_keywords()
                .any(|k| k == word || text::tokens(k).any(|t| t == word))
    };
    let curated = reference.domain_terms.is_phrase(&category.id, phrase)
        || reference.domain_terms.is_phrase(&category.id, &pair.joined());
    curated && (associated(pair.first()) || associated(pair.second()))
}

struct SuggestionCollector<'a> {
    category_id: &'a str,
    config: &'a LearningConfig,
    kept: Vec<DictionaryUpdateSuggestion>,
    discarded: usize,
}

impl<'a> SuggestionCollector<'a> {
    fn new(category_id: &'a str, config: &'a LearningConfig) -> Self {
        Self {
            category_id,
            config,
            kept: Vec::new(),
            discarded: 0,
        }
    }

    /// `min(supporting / divisor, 1)` once the minimum support is met.
    fn supported_confidence(&self, supporting: usize) -> Option<f64> {
        if supporting < self.config.min_supporting_feedback {
            return None;
        }
        Some((supporting as f64 / self.config.support_divisor).min(1.0))
    }

    fn offer(
        &mut self,
        action: SuggestionAction,
        update: DictionaryUpdate,
        confidence: f64,
        supporting: Vec<String>,
    ) {
        if confidence < self.config.min_suggestion_confidence {
            events::suggestion_discarded(self.category_id, &update.describe(), confidence);
            self.discarded += 1;
            return;
        }
        self.kept.push(DictionaryUpdateSuggestion {
            category_id: self.category_id.to_string(),
            action,
            update,
            confidence,
            frequency: supporting.len(),
            supporting_feedback_ids: supporting,
        });
    }

    fn finish(self) -> (Vec<DictionaryUpdateSuggestion>, usize) {
        (self.kept, self.discarded)
    }
}
