use serde::{Deserialize, Serialize};

use super::defaults;

/// Caps for the bounded histories and audit logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    pub feedback_history_cap: usize,
    pub learning_action_cap: usize,
    pub dictionary_update_cap: usize,
    pub classification_history_cap: usize,
    pub proposal_cap: usize,
    pub learned_pattern_cap: usize,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            feedback_history_cap: defaults::DEFAULT_FEEDBACK_HISTORY_CAP,
            learning_action_cap: defaults::DEFAULT_LEARNING_ACTION_CAP,
            dictionary_update_cap: defaults::DEFAULT_DICTIONARY_UPDATE_CAP,
            classification_history_cap: defaults::DEFAULT_CLASSIFICATION_HISTORY_CAP,
            proposal_cap: defaults::DEFAULT_PROPOSAL_CAP,
            learned_pattern_cap: defaults::DEFAULT_LEARNED_PATTERN_CAP,
        }
    }
}
