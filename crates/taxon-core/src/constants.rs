/// Taxon system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Persistence key for the bounded feedback history.
pub const KEY_FEEDBACK_HISTORY: &str = "taxon/feedback_history";

/// Persistence key for the learned-pattern table.
pub const KEY_LEARNED_PATTERNS: &str = "taxon/learned_patterns";

/// Persistence key for the dictionary-update audit log.
pub const KEY_DICTIONARY_UPDATES: &str = "taxon/dictionary_updates";

/// Persistence key for the learning-action audit log.
pub const KEY_LEARNING_ACTIONS: &str = "taxon/learning_actions";

/// Persistence key for the authoritative dictionary.
pub const KEY_DICTIONARY: &str = "taxon/dictionary";

/// Persistence key for queued (not yet applied) proposals.
pub const KEY_PROPOSALS: &str = "taxon/proposals";

/// Upper bound on any caller-supplied result limit.
pub const MAX_RESULT_LIMIT: usize = 1000;
