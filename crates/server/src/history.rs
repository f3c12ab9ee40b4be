//! In-memory per-sender message history
//!
//! Backs the spam detector's `MessageHistory` seam. Each sender keeps a
//! bounded recent window (entry count and age, whichever trims more) plus a
//! cumulative counter that survives window eviction.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use chat_triage_core::{HistoryEntry, MessageHistory};
use chat_triage_config::HistoryConfig;

pub struct InMemoryMessageHistory {
    config: HistoryConfig,
    windows: DashMap<String, VecDeque<HistoryEntry>>,
    totals: DashMap<String, u64>,
}

impl InMemoryMessageHistory {
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            config: config.clone(),
            windows: DashMap::new(),
            totals: DashMap::new(),
        }
    }

    /// Number of senders currently tracked
    pub fn sender_count(&self) -> usize {
        self.windows.len()
    }

    fn evict(&self, window: &mut VecDeque<HistoryEntry>, now: DateTime<Utc>) {
        let cutoff = now - Duration::seconds(self.config.window_seconds as i64);
        while window
            .front()
            .is_some_and(|e| e.timestamp < cutoff)
        {
            window.pop_front();
        }
        while window.len() > self.config.window_entries {
            window.pop_front();
        }
    }
}

impl MessageHistory for InMemoryMessageHistory {
    fn recent(&self, sender_id: &str) -> Vec<HistoryEntry> {
        match self.windows.get(sender_id) {
            Some(window) => {
                let cutoff = Utc::now() - Duration::seconds(self.config.window_seconds as i64);
                window
                    .iter()
                    .filter(|e| e.timestamp >= cutoff)
                    .cloned()
                    .collect()
            }
            None => Vec::new(),
        }
    }

    fn total_count(&self, sender_id: &str) -> u64 {
        self.totals.get(sender_id).map(|c| *c).unwrap_or(0)
    }

    fn record(&self, sender_id: &str, text: &str, at: DateTime<Utc>) {
        let mut window = self.windows.entry(sender_id.to_string()).or_default();
        window.push_back(HistoryEntry {
            text: text.to_string(),
            timestamp: at,
        });
        self.evict(&mut window, at);
        drop(window);

        *self.totals.entry(sender_id.to_string()).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> InMemoryMessageHistory {
        InMemoryMessageHistory::new(&HistoryConfig {
            window_entries: 3,
            window_seconds: 60,
        })
    }

    #[test]
    fn test_record_and_recent_ordered() {
        let h = history();
        let base = Utc::now();

        h.record("v1", "first", base);
        h.record("v1", "second", base + Duration::seconds(1));

        let recent = h.recent("v1");
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].text, "first");
        assert_eq!(recent[1].text, "second");
    }

    #[test]
    fn test_window_bounded_by_entry_count() {
        let h = history();
        let base = Utc::now();

        for i in 0..5 {
            h.record("v1", &format!("m{}", i), base + Duration::seconds(i));
        }

        let recent = h.recent("v1");
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].text, "m2");
    }

    #[test]
    fn test_old_entries_age_out() {
        let h = history();
        let base = Utc::now();

        h.record("v1", "ancient", base - Duration::seconds(120));
        h.record("v1", "fresh", base);

        let recent = h.recent("v1");
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].text, "fresh");
    }

    #[test]
    fn test_total_count_survives_eviction() {
        let h = history();
        let base = Utc::now();

        for i in 0..10 {
            h.record("v1", &format!("m{}", i), base + Duration::seconds(i));
        }

        assert_eq!(h.recent("v1").len(), 3);
        assert_eq!(h.total_count("v1"), 10);
    }

    #[test]
    fn test_senders_isolated() {
        let h = history();
        let base = Utc::now();

        h.record("v1", "from v1", base);
        h.record("v2", "from v2", base);

        assert_eq!(h.recent("v1").len(), 1);
        assert_eq!(h.recent("v2").len(), 1);
        assert_eq!(h.total_count("v3"), 0);
        assert_eq!(h.sender_count(), 2);
    }
}
