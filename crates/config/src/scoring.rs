//! Lead scoring configuration
//!
//! Every magnitude the scorer uses lives here; none are hardcoded in the
//! engine. Defaults are the production tuning.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Scoring magnitudes, thresholds, and lead keyword lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Starting score before any bonus
    #[serde(default = "default_base_score")]
    pub base_score: u32,

    /// Bonus per matched hot keyword (uncapped accumulation)
    #[serde(default = "default_hot_keyword_bonus")]
    pub hot_keyword_bonus: u32,

    /// Bonus per matched warm keyword
    #[serde(default = "default_warm_keyword_bonus")]
    pub warm_keyword_bonus: u32,

    /// High-intent keywords
    #[serde(default = "default_hot_keywords")]
    pub hot_keywords: Vec<String>,

    /// Interest-signaling keywords
    #[serde(default = "default_warm_keywords")]
    pub warm_keywords: Vec<String>,

    /// Pages visited at or above this count earn the pages bonus
    #[serde(default = "default_pages_threshold")]
    pub pages_threshold: usize,

    #[serde(default = "default_pages_bonus")]
    pub pages_bonus: u32,

    /// Visit count at or above this earns the visits bonus
    #[serde(default = "default_visits_threshold")]
    pub visits_threshold: u32,

    #[serde(default = "default_visits_bonus")]
    pub visits_bonus: u32,

    /// Time on site at or above this (seconds) earns the time bonus
    #[serde(default = "default_time_threshold_secs")]
    pub time_threshold_secs: u64,

    #[serde(default = "default_time_bonus")]
    pub time_bonus: u32,

    #[serde(default = "default_urgency_high_bonus")]
    pub urgency_high_bonus: u32,

    #[serde(default = "default_urgency_medium_bonus")]
    pub urgency_medium_bonus: u32,

    /// Deducted when the spam detector flagged the sender
    #[serde(default = "default_spam_penalty")]
    pub spam_penalty: u32,

    /// Score at or above this is Hot
    #[serde(default = "default_hot_threshold")]
    pub hot_threshold: u32,

    /// Score at or above this (but below hot) is Warm
    #[serde(default = "default_warm_threshold")]
    pub warm_threshold: u32,
}

fn default_base_score() -> u32 {
    50
}
fn default_hot_keyword_bonus() -> u32 {
    30
}
fn default_warm_keyword_bonus() -> u32 {
    15
}
fn default_hot_keywords() -> Vec<String> {
    ["buy", "purchase", "pricing", "quote", "demo", "urgent"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_warm_keywords() -> Vec<String> {
    ["interested", "features", "plan", "cost", "trial"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_pages_threshold() -> usize {
    5
}
fn default_pages_bonus() -> u32 {
    15
}
fn default_visits_threshold() -> u32 {
    3
}
fn default_visits_bonus() -> u32 {
    20
}
fn default_time_threshold_secs() -> u64 {
    300
}
fn default_time_bonus() -> u32 {
    10
}
fn default_urgency_high_bonus() -> u32 {
    10
}
fn default_urgency_medium_bonus() -> u32 {
    5
}
fn default_spam_penalty() -> u32 {
    20
}
fn default_hot_threshold() -> u32 {
    75
}
fn default_warm_threshold() -> u32 {
    50
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: default_base_score(),
            hot_keyword_bonus: default_hot_keyword_bonus(),
            warm_keyword_bonus: default_warm_keyword_bonus(),
            hot_keywords: default_hot_keywords(),
            warm_keywords: default_warm_keywords(),
            pages_threshold: default_pages_threshold(),
            pages_bonus: default_pages_bonus(),
            visits_threshold: default_visits_threshold(),
            visits_bonus: default_visits_bonus(),
            time_threshold_secs: default_time_threshold_secs(),
            time_bonus: default_time_bonus(),
            urgency_high_bonus: default_urgency_high_bonus(),
            urgency_medium_bonus: default_urgency_medium_bonus(),
            spam_penalty: default_spam_penalty(),
            hot_threshold: default_hot_threshold(),
            warm_threshold: default_warm_threshold(),
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_score > 100 {
            return Err(ConfigError::InvalidValue {
                field: "scoring.base_score".to_string(),
                message: format!("Must be at most 100, got {}", self.base_score),
            });
        }

        if self.hot_threshold > 100 {
            return Err(ConfigError::InvalidValue {
                field: "scoring.hot_threshold".to_string(),
                message: format!("Must be at most 100, got {}", self.hot_threshold),
            });
        }

        // Thresholds must be ordered or bucketing is ambiguous
        if self.warm_threshold >= self.hot_threshold {
            return Err(ConfigError::InvalidValue {
                field: "scoring.warm_threshold".to_string(),
                message: format!(
                    "Must be below hot_threshold ({}), got {}",
                    self.hot_threshold, self.warm_threshold
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ScoringConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_score, 50);
        assert_eq!(config.hot_threshold, 75);
        assert_eq!(config.warm_threshold, 50);
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = ScoringConfig::default();
        config.warm_threshold = 80;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_scoring_from_yaml() {
        let yaml = r#"
base_score: 0
hot_keyword_bonus: 40
hot_threshold: 60
warm_threshold: 30
hot_keywords:
  - buy now
"#;
        let config: ScoringConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.base_score, 0);
        assert_eq!(config.hot_keyword_bonus, 40);
        assert_eq!(config.hot_keywords, vec!["buy now"]);
        // Unspecified fields keep their defaults
        assert_eq!(config.spam_penalty, 20);
        assert!(config.validate().is_ok());
    }
}
