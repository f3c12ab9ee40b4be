//! Inbound message and visitor metadata
//!
//! Everything here is transient: constructed per inbound message and
//! discarded once the routing decision has been handed off. Missing fields
//! default to the lowest-impact value instead of failing classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single inbound chat message from the website widget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Raw message text (empty when the widget sent none)
    #[serde(default)]
    pub text: String,
    /// Arrival timestamp
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Sender identifier (session id or IP)
    pub sender_id: String,
}

impl InboundMessage {
    pub fn new(text: impl Into<String>, sender_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Utc::now(),
            sender_id: sender_id.into(),
        }
    }
}

/// Declared urgency from the widget form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Urgency {
    High,
    Medium,
    Low,
    /// Visitor did not declare urgency
    #[default]
    Unset,
}

/// Attributes observed about the visitor/session
///
/// None of these are validated at this layer; absent numeric fields are
/// treated as zero and absent enums as unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisitorMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Paths of pages visited this session
    #[serde(default)]
    pub pages_visited: Vec<String>,
    /// Cumulative time on site in seconds
    #[serde(default)]
    pub time_on_site_secs: u64,
    /// Number of distinct visits
    #[serde(default)]
    pub visit_count: u32,
    #[serde(default)]
    pub urgency: Urgency,
    /// Free-text business type declared by the visitor
    #[serde(default)]
    pub business_type: Option<String>,
    /// Free-text requirement description
    #[serde(default)]
    pub requirement: Option<String>,
}

impl VisitorMetadata {
    /// Number of pages visited this session
    pub fn pages_count(&self) -> usize {
        self.pages_visited.len()
    }

    /// True when the visitor left any way to reach them
    pub fn has_contact_info(&self) -> bool {
        self.email.is_some() || self.phone.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_defaults_from_empty_json() {
        let meta: VisitorMetadata = serde_json::from_str("{}").unwrap();
        assert_eq!(meta.time_on_site_secs, 0);
        assert_eq!(meta.visit_count, 0);
        assert_eq!(meta.urgency, Urgency::Unset);
        assert!(meta.pages_visited.is_empty());
        assert!(!meta.has_contact_info());
    }

    #[test]
    fn test_missing_message_text_defaults_to_empty() {
        let msg: InboundMessage =
            serde_json::from_str(r#"{"sender_id": "visitor-1"}"#).unwrap();
        assert_eq!(msg.text, "");
    }
}
