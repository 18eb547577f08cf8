//! Configuration, loaded from TOML with every field defaulted.
//!
//! # Examples
//!
//! ```
//! use taxon_core::config::TaxonConfig;
//!
//! let config = TaxonConfig::from_toml("[learning]\nauto_apply_threshold = 0.9").unwrap();
//! assert!((config.learning.auto_apply_threshold - 0.9).abs() < f64::EPSILON);
//! assert_eq!(config.scoring.leadership_confidence, 95);
//! ```

pub mod defaults;
mod learning_config;
mod observability_config;
mod retention_config;
mod scoring_config;
mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use learning_config::LearningConfig;
pub use observability_config::ObservabilityConfig;
pub use retention_config::RetentionConfig;
pub use scoring_config::ScoringConfig;
pub use storage_config::StorageConfig;

use crate::errors::{ConfigError, TaxonResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonConfig {
    pub scoring: ScoringConfig,
    pub learning: LearningConfig,
    pub retention: RetentionConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl TaxonConfig {
    /// Parse a TOML string. Missing sections and fields take their defaults.
    pub fn from_toml(source: &str) -> TaxonResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> TaxonResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&source)
    }

    /// Reject combinations that would make the learning loop misbehave.
    pub fn validate(&self) -> TaxonResult<()> {
        let learning = &self.learning;
        if !(0.0..=1.0).contains(&learning.auto_apply_threshold) {
            return Err(invalid("learning.auto_apply_threshold", "must be within [0, 1]"));
        }
        if learning.auto_apply_threshold < learning.min_suggestion_confidence {
            return Err(invalid(
                "learning.auto_apply_threshold",
                "must not be below learning.min_suggestion_confidence",
            ));
        }
        if learning.support_divisor <= 0.0 {
            return Err(invalid("learning.support_divisor", "must be positive"));
        }
        let scoring = &self.scoring;
        if scoring.hybrid_high_bound < scoring.hybrid_low_bound {
            return Err(invalid(
                "scoring.hybrid_high_bound",
                "must not be below scoring.hybrid_low_bound",
            ));
        }
        if scoring.leadership_confidence > 100 || scoring.fallback_confidence > 100 {
            return Err(invalid("scoring", "fixed confidences must be within [0, 100]"));
        }
        if scoring.leadership_category.trim().is_empty() || scoring.fallback_category.trim().is_empty() {
            return Err(invalid("scoring", "leadership and fallback categories must be set"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> crate::errors::TaxonError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
