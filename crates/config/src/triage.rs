//! Aggregate triage rules loaded from triage.yaml
//!
//! Reloadable at runtime: the admin endpoint re-reads the file and swaps the
//! engine if validation passes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, KeywordsConfig, ScoringConfig, SpamConfig};

/// Keyword tables, scoring magnitudes, and spam thresholds as one document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriageConfig {
    #[serde(default)]
    pub keywords: KeywordsConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub spam: SpamConfig,
}

impl TriageConfig {
    /// Load and validate from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|_| ConfigError::FileNotFound(path.as_ref().display().to_string()))?;

        let config: TriageConfig =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.keywords.validate()?;
        self.scoring.validate()?;
        self.spam.validate()?;
        Ok(())
    }
}
