//! Spam verdict types and the history entry consumed by the detector

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which independent heuristic flagged the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpamRule {
    /// Message shorter than the minimum length
    Short,
    /// Identical text repeated too often by the same sender
    Repeat,
    /// Too many messages arriving faster than the burst gap allows
    Rate,
    /// Uppercase/special-character ratio above threshold
    Casing,
    /// Sender seen too many times cumulatively
    IpFrequency,
}

impl SpamRule {
    /// Stable identifier used in logs and metrics labels
    pub fn as_str(&self) -> &'static str {
        match self {
            SpamRule::Short => "short",
            SpamRule::Repeat => "repeat",
            SpamRule::Rate => "rate",
            SpamRule::Casing => "casing",
            SpamRule::IpFrequency => "ip_frequency",
        }
    }
}

/// Verdict from the spam detector
///
/// When flagged, the verdict preempts every other mode and suppresses
/// lead-creation and ticket-creation side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpamVerdict {
    pub flagged: bool,
    /// First rule that matched, for observability
    pub rule: Option<SpamRule>,
}

impl SpamVerdict {
    pub fn clean() -> Self {
        Self {
            flagged: false,
            rule: None,
        }
    }

    pub fn flagged_by(rule: SpamRule) -> Self {
        Self {
            flagged: true,
            rule: Some(rule),
        }
    }
}

/// One recorded message in a sender's recent history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub timestamp: DateTime<Utc>,
}
