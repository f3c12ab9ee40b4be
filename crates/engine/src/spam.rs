//! Spam detector
//!
//! Five independent rules evaluated in a fixed order, first hit wins. The
//! detector holds no state of its own; sender history is injected and the
//! current message is NOT yet recorded in it when `check` runs.

use chat_triage_core::{InboundMessage, MessageHistory, SpamRule, SpamVerdict};
use chat_triage_config::SpamConfig;

#[derive(Debug, Clone)]
pub struct SpamDetector {
    config: SpamConfig,
}

impl SpamDetector {
    pub fn new(config: &SpamConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn check(&self, message: &InboundMessage, history: &dyn MessageHistory) -> SpamVerdict {
        if let Some(rule) = self.first_matching_rule(message, history) {
            tracing::debug!(
                sender = %message.sender_id,
                rule = rule.as_str(),
                "message flagged as spam"
            );
            return SpamVerdict::flagged_by(rule);
        }
        SpamVerdict::clean()
    }

    fn first_matching_rule(
        &self,
        message: &InboundMessage,
        history: &dyn MessageHistory,
    ) -> Option<SpamRule> {
        let recent = history.recent(&message.sender_id);

        if message.text.chars().count() < self.config.min_length {
            return Some(SpamRule::Short);
        }

        // Counting the current message, identical text at or past the limit
        let repeats = recent.iter().filter(|e| e.text == message.text).count() + 1;
        if repeats >= self.config.repeat_limit {
            return Some(SpamRule::Repeat);
        }

        if self.burst_detected(&recent, message) {
            return Some(SpamRule::Rate);
        }

        if self.shouting(&message.text) {
            return Some(SpamRule::Casing);
        }

        if history.total_count(&message.sender_id) + 1 >= self.config.sender_total_limit {
            return Some(SpamRule::IpFrequency);
        }

        None
    }

    /// Longest chain of consecutive messages with sub-threshold gaps,
    /// current message included
    fn burst_detected(
        &self,
        recent: &[chat_triage_core::HistoryEntry],
        message: &InboundMessage,
    ) -> bool {
        let mut timestamps: Vec<_> = recent.iter().map(|e| e.timestamp).collect();
        timestamps.push(message.timestamp);

        let gap_limit = self.config.burst_gap_ms as i64;
        let mut chain = 1usize;
        let mut longest = 1usize;

        for pair in timestamps.windows(2) {
            let gap_ms = (pair[1] - pair[0]).num_milliseconds();
            if gap_ms >= 0 && gap_ms < gap_limit {
                chain += 1;
            } else {
                chain = 1;
            }
            longest = longest.max(chain);
        }

        longest >= self.config.burst_limit
    }

    /// Uppercase + special character ratio, only on long-enough messages
    fn shouting(&self, text: &str) -> bool {
        let len = text.chars().count();
        if len < self.config.casing_min_length {
            return false;
        }

        let noisy = text
            .chars()
            .filter(|c| c.is_uppercase() || (!c.is_alphanumeric() && !c.is_whitespace()))
            .count();

        noisy as f64 / len as f64 > self.config.casing_ratio
    }
}
