//! Handling mode tags
//!
//! Exactly one tag is assigned per message; selection is first-match over
//! the keyword tables in a fixed priority order.

use serde::{Deserialize, Serialize};

/// The handling category assigned to an inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeTag {
    /// Customer support Q&A (default when nothing else matches)
    Support,
    /// Lead-bearing sales inquiry, goes through the lead scorer
    Sales,
    Billing,
    Technical,
    Faq,
    /// Internal workflow trigger, never customer-facing
    Internal,
    Analytics,
    /// Terminal rejection, suppresses all side effects
    Spam,
}

impl ModeTag {
    /// Stable identifier used in logs and metrics labels
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeTag::Support => "support",
            ModeTag::Sales => "sales",
            ModeTag::Billing => "billing",
            ModeTag::Technical => "technical",
            ModeTag::Faq => "faq",
            ModeTag::Internal => "internal",
            ModeTag::Analytics => "analytics",
            ModeTag::Spam => "spam",
        }
    }

    /// True for modes that produce a lead score
    pub fn is_lead_bearing(&self) -> bool {
        matches!(self, ModeTag::Sales)
    }

    /// True for modes handled internally with no customer-facing ticket
    pub fn is_internal(&self) -> bool {
        matches!(self, ModeTag::Internal | ModeTag::Analytics)
    }
}

impl std::fmt::Display for ModeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
