use taxon_core::config::*;
use taxon_core::errors::{ConfigError, TaxonError};

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = TaxonConfig::from_toml("").unwrap();

    // Scoring defaults
    assert_eq!(config.scoring.core_label_weight, 12.0);
    assert_eq!(config.scoring.title_multiplier, 1.5);
    assert_eq!(config.scoring.ambiguity_threshold, 10.0);
    assert_eq!(config.scoring.medium_confidence, 40.0);
    assert_eq!(config.scoring.max_secondary, 3);
    assert_eq!(config.scoring.leadership_confidence, 95);
    assert_eq!(config.scoring.fallback_confidence, 25);
    assert_eq!(config.scoring.leadership_category, "leadership");
    assert_eq!(config.scoring.fallback_category, "general");

    // Learning defaults
    assert_eq!(config.learning.auto_apply_threshold, 0.8);
    assert_eq!(config.learning.min_suggestion_confidence, 0.4);
    assert_eq!(config.learning.max_candidates_per_job, 10);

    // Retention defaults
    assert_eq!(config.retention.feedback_history_cap, 200);
    assert_eq!(config.retention.learning_action_cap, 100);

    // Storage / observability defaults
    assert_eq!(config.storage.db_path, "taxon.db");
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[scoring]
affiliation_boost = 5.0

[retention]
feedback_history_cap = 50
"#;
    let config = TaxonConfig::from_toml(toml).unwrap();
    assert_eq!(config.scoring.affiliation_boost, 5.0);
    assert_eq!(config.retention.feedback_history_cap, 50);
    // Non-overridden fields keep defaults
    assert_eq!(config.scoring.context_pair_bonus, 15.0);
    assert_eq!(config.retention.learning_action_cap, 100);
}

#[test]
fn config_serde_roundtrip() {
    let config = TaxonConfig::default();
    let toml_str = toml::to_string(&config).unwrap();
    let roundtripped = TaxonConfig::from_toml(&toml_str).unwrap();
    assert_eq!(
        roundtripped.scoring.fallback_category,
        config.scoring.fallback_category
    );
    assert_eq!(
        roundtripped.learning.auto_apply_threshold,
        config.learning.auto_apply_threshold
    );
}

#[test]
fn config_rejects_auto_apply_below_min_confidence() {
    let toml = r#"
[learning]
auto_apply_threshold = 0.3
min_suggestion_confidence = 0.4
"#;
    let err = TaxonConfig::from_toml(toml).unwrap_err();
    assert!(matches!(
        err,
        TaxonError::ConfigError(ConfigError::Invalid { .. })
    ));
}

#[test]
fn config_rejects_malformed_toml() {
    let err = TaxonConfig::from_toml("[scoring\n").unwrap_err();
    assert!(matches!(err, TaxonError::ConfigError(ConfigError::Parse { .. })));
}
