//! Queue of suggestions below the auto-apply threshold, awaiting review or
//! further evidence.

use std::collections::BTreeMap;
use std::sync::Mutex;

use taxon_core::errors::TaxonResult;
use taxon_core::models::DictionaryUpdateSuggestion;

/// Proposals keyed by [`DictionaryUpdateSuggestion::key`]. Merging keeps the
/// highest confidence seen and the union of supporting feedback ids.
#[derive(Debug)]
pub struct ProposalQueue {
    proposals: Mutex<BTreeMap<String, DictionaryUpdateSuggestion>>,
    cap: usize,
}

impl ProposalQueue {
    pub fn new(cap: usize) -> Self {
        Self {
            proposals: Mutex::new(BTreeMap::new()),
            cap: cap.max(1),
        }
    }

    pub fn merge(&self, suggestion: DictionaryUpdateSuggestion) {
        let Ok(mut proposals) = self.proposals.lock() else {
            return;
        };
        let key = suggestion.key();
        match proposals.get_mut(&key) {
            Some(existing) => {
                if suggestion.confidence > existing.confidence {
                    existing.confidence = suggestion.confidence;
                    existing.action = suggestion.action;
                    existing.update = suggestion.update;
                }
                existing.frequency = existing.frequency.max(suggestion.frequency);
                for id in suggestion.supporting_feedback_ids {
                    if !existing.supporting_feedback_ids.contains(&id) {
                        existing.supporting_feedback_ids.push(id);
                    }
                }
            }
            None => {
                proposals.insert(key, suggestion);
                if proposals.len() > self.cap {
                    evict_weakest(&mut proposals);
                }
            }
        }
    }

    /// Remove and return a proposal.
    pub fn take(&self, key: &str) -> Option<DictionaryUpdateSuggestion> {
        self.proposals.lock().ok()?.remove(key)
    }

    pub fn remove(&self, key: &str) {
        if let Ok(mut proposals) = self.proposals.lock() {
            proposals.remove(key);
        }
    }

    pub fn len(&self) -> usize {
        self.proposals.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest confidence first, ties by key.
    pub fn pending(&self, limit: usize) -> Vec<DictionaryUpdateSuggestion> {
        let Ok(proposals) = self.proposals.lock() else {
            return Vec::new();
        };
        let mut pending: Vec<(&String, &DictionaryUpdateSuggestion)> = proposals.iter().collect();
        pending.sort_by(|(ka, a), (kb, b)| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| ka.cmp(kb))
        });
        pending
            .into_iter()
            .take(limit)
            .map(|(_, s)| s.clone())
            .collect()
    }

    pub fn to_json(&self) -> TaxonResult<String> {
        let all: Vec<DictionaryUpdateSuggestion> = self
            .proposals
            .lock()
            .map(|p| p.values().cloned().collect())
            .unwrap_or_default();
        Ok(serde_json::to_string(&all)?)
    }

    pub fn restore_json(&self, json: &str) -> TaxonResult<()> {
        let all: Vec<DictionaryUpdateSuggestion> = serde_json::from_str(json)?;
        if let Ok(mut proposals) = self.proposals.lock() {
            proposals.clear();
        }
        for suggestion in all {
            self.merge(suggestion);
        }
        Ok(())
    }
}

fn evict_weakest(proposals: &mut BTreeMap<String, DictionaryUpdateSuggestion>) {
    let weakest = proposals
        .iter()
        .min_by(|(ka, a), (kb, b)| {
            a.confidence
                .total_cmp(&b.confidence)
                .then_with(|| kb.cmp(ka))
        })
        .map(|(k, _)| k.clone());
    if let Some(key) = weakest {
        proposals.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxon_core::models::{DictionaryUpdate, KeywordTier, SuggestionAction};

    fn suggestion(keyword: &str, confidence: f64, ids: &[&str]) -> DictionaryUpdateSuggestion {
        DictionaryUpdateSuggestion {
            category_id: "technology".to_string(),
            action: SuggestionAction::AddSupportKeyword,
            update: DictionaryUpdate::keyword(KeywordTier::Support, keyword),
            confidence,
            supporting_feedback_ids: ids.iter().map(|s| s.to_string()).collect(),
            frequency: ids.len(),
        }
    }

    #[test]
    fn merge_keeps_max_confidence_and_union_of_ids() {
        let queue = ProposalQueue::new(10);
        queue.merge(suggestion("rust", 0.5, &["a", "b"]));
        queue.merge(suggestion("rust", 0.4, &["b", "c"]));
        let pending = queue.pending(10);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].confidence, 0.5);
        assert_eq!(pending[0].supporting_feedback_ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn cap_evicts_lowest_confidence() {
        let queue = ProposalQueue::new(2);
        queue.merge(suggestion("a", 0.6, &[]));
        queue.merge(suggestion("b", 0.4, &[]));
        queue.merge(suggestion("c", 0.5, &[]));
        let keys: Vec<_> = queue.pending(10).iter().map(|s| s.key()).collect();
        assert_eq!(keys, vec!["technology:keyword:a", "technology:keyword:c"]);
    }

    #[test]
    fn take_removes() {
        let queue = ProposalQueue::new(10);
        queue.merge(suggestion("rust", 0.5, &[]));
        assert!(queue.take("technology:keyword:rust").is_some());
        assert!(queue.is_empty());
    }
}
