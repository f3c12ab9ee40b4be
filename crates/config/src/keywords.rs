//! Keyword tables for mode classification
//!
//! Table order IS the classification priority: the classifier walks the list
//! and the first table with a matching trigger wins. Defaults mirror the
//! hand-curated production tables; deployments override via triage.yaml.

use serde::{Deserialize, Serialize};

use chat_triage_core::ModeTag;

use crate::ConfigError;

/// How a trigger is matched against the lowercased message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrictness {
    /// Plain substring containment ("how" matches inside "showroom")
    #[default]
    Substring,
    /// Trigger must appear as a whole word (or word sequence)
    WordBoundary,
}

/// One category's trigger set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordTable {
    pub mode: ModeTag,
    /// Lowercase trigger substrings
    #[serde(default)]
    pub triggers: Vec<String>,
}

impl KeywordTable {
    pub fn new(mode: ModeTag, triggers: &[&str]) -> Self {
        Self {
            mode,
            triggers: triggers.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Ordered keyword tables plus the matching strictness
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordsConfig {
    #[serde(default)]
    pub matching: MatchStrictness,

    /// Tables in classification priority order
    #[serde(default = "default_tables")]
    pub tables: Vec<KeywordTable>,
}

fn default_tables() -> Vec<KeywordTable> {
    vec![
        KeywordTable::new(
            ModeTag::Internal,
            &["#internal", "#escalate", "#handoff", "agent takeover"],
        ),
        KeywordTable::new(
            ModeTag::Sales,
            &[
                "pricing",
                "price",
                "quote",
                "demo",
                "cost",
                "buy",
                "purchase",
                "subscription",
                "plan",
                "interested",
                "features",
                "solution",
            ],
        ),
        KeywordTable::new(
            ModeTag::Billing,
            &[
                "invoice",
                "payment",
                "refund",
                "charge",
                "bill",
                "credit card",
                "transaction",
                "receipt",
            ],
        ),
        KeywordTable::new(
            ModeTag::Technical,
            &[
                "integration",
                "api",
                "deploy",
                "timeout",
                "database",
                "server",
                "webhook",
                "authentication",
                "ssl",
                "certificate",
            ],
        ),
        KeywordTable::new(
            ModeTag::Faq,
            &["how", "where", "what", "can i", "do you", "why", "when"],
        ),
        KeywordTable::new(
            ModeTag::Analytics,
            &["#stats", "#report", "dashboard summary"],
        ),
    ]
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            matching: MatchStrictness::default(),
            tables: default_tables(),
        }
    }
}

impl KeywordsConfig {
    /// Triggers for a mode, if it has a table
    pub fn triggers_for(&self, mode: ModeTag) -> Option<&[String]> {
        self.tables
            .iter()
            .find(|t| t.mode == mode)
            .map(|t| t.triggers.as_slice())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for table in &self.tables {
            if matches!(table.mode, ModeTag::Spam | ModeTag::Support) {
                return Err(ConfigError::InvalidValue {
                    field: "keywords.tables".to_string(),
                    message: format!(
                        "mode '{}' is not keyword-driven (spam is heuristic, support is the fallback)",
                        table.mode
                    ),
                });
            }
            for trigger in &table.triggers {
                if trigger.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: "keywords.tables".to_string(),
                        message: format!("empty trigger in table '{}'", table.mode),
                    });
                }
                if trigger.chars().any(|c| c.is_uppercase()) {
                    return Err(ConfigError::InvalidValue {
                        field: "keywords.tables".to_string(),
                        message: format!(
                            "trigger '{}' in table '{}' must be lowercase",
                            trigger, table.mode
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_order() {
        let config = KeywordsConfig::default();
        let order: Vec<ModeTag> = config.tables.iter().map(|t| t.mode).collect();
        assert_eq!(
            order,
            vec![
                ModeTag::Internal,
                ModeTag::Sales,
                ModeTag::Billing,
                ModeTag::Technical,
                ModeTag::Faq,
                ModeTag::Analytics,
            ]
        );
    }

    #[test]
    fn test_defaults_pass_validation() {
        assert!(KeywordsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_uppercase_trigger_rejected() {
        let mut config = KeywordsConfig::default();
        config.tables[1].triggers.push("Pricing".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_spam_table_rejected() {
        let mut config = KeywordsConfig::default();
        config.tables.push(KeywordTable::new(ModeTag::Spam, &["x"]));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_keywords_from_yaml_preserve_order() {
        let yaml = r##"
matching: word_boundary
tables:
  - mode: internal
    triggers: ["#internal"]
  - mode: billing
    triggers: ["invoice"]
  - mode: sales
    triggers: ["pricing"]
"##;
        let config: KeywordsConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.matching, MatchStrictness::WordBoundary);
        assert_eq!(config.tables[1].mode, ModeTag::Billing);
        assert_eq!(config.tables[2].mode, ModeTag::Sales);
    }
}
