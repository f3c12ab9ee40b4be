//! Spam detection thresholds

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Thresholds for the ordered spam rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpamConfig {
    /// Messages shorter than this are rejected outright
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Identical texts within the window at or above this count
    #[serde(default = "default_repeat_limit")]
    pub repeat_limit: usize,

    /// Messages in the window at or above this count trigger the rate check
    #[serde(default = "default_burst_limit")]
    pub burst_limit: usize,

    /// Inter-arrival gap below this counts toward the burst
    #[serde(default = "default_burst_gap_ms")]
    pub burst_gap_ms: u64,

    /// Uppercase + special character ratio above this flags the message
    #[serde(default = "default_casing_ratio")]
    pub casing_ratio: f64,

    /// Casing rule only applies at or above this length (avoids false
    /// positives on short shouts)
    #[serde(default = "default_casing_min_length")]
    pub casing_min_length: usize,

    /// Cumulative messages from one sender at or above this count
    #[serde(default = "default_sender_total_limit")]
    pub sender_total_limit: u64,
}

fn default_min_length() -> usize {
    3
}
fn default_repeat_limit() -> usize {
    3
}
fn default_burst_limit() -> usize {
    5
}
fn default_burst_gap_ms() -> u64 {
    2000
}
fn default_casing_ratio() -> f64 {
    0.5
}
fn default_casing_min_length() -> usize {
    12
}
fn default_sender_total_limit() -> u64 {
    100
}

impl Default for SpamConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            repeat_limit: default_repeat_limit(),
            burst_limit: default_burst_limit(),
            burst_gap_ms: default_burst_gap_ms(),
            casing_ratio: default_casing_ratio(),
            casing_min_length: default_casing_min_length(),
            sender_total_limit: default_sender_total_limit(),
        }
    }
}

impl SpamConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repeat_limit < 2 {
            return Err(ConfigError::InvalidValue {
                field: "spam.repeat_limit".to_string(),
                message: "Must be at least 2".to_string(),
            });
        }

        if self.burst_limit < 2 {
            return Err(ConfigError::InvalidValue {
                field: "spam.burst_limit".to_string(),
                message: "Must be at least 2".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.casing_ratio) {
            return Err(ConfigError::InvalidValue {
                field: "spam.casing_ratio".to_string(),
                message: format!("Must be between 0.0 and 1.0, got {}", self.casing_ratio),
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
        let config = SpamConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_length, 3);
        assert_eq!(config.repeat_limit, 3);
        assert_eq!(config.sender_total_limit, 100);
    }

    #[test]
    fn test_out_of_range_ratio_rejected() {
        let mut config = SpamConfig::default();
        config.casing_ratio = 1.5;
        assert!(config.validate().is_err());
    }
}
