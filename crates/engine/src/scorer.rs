//! Lead scorer
//!
//! Pure arithmetic over the message text and visitor metadata. Base score
//! plus independent bonuses, a spam penalty, clamp to 0-100, then threshold
//! bucketing into Hot/Warm/Cold with a contact-window SLA.

use chat_triage_core::{
    ContactWindow, LeadScore, Qualification, ScoreBreakdown, Urgency, VisitorMetadata,
};
use chat_triage_config::ScoringConfig;

#[derive(Debug, Clone)]
pub struct LeadScorer {
    config: ScoringConfig,
}

impl LeadScorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Score a message. Pure; the caller decides what to do with the result.
    ///
    /// `spam_flagged` is the independent spam detector's verdict for this
    /// sender and applies the configured penalty.
    pub fn score(&self, text: &str, metadata: &VisitorMetadata, spam_flagged: bool) -> LeadScore {
        let message = text.to_lowercase();
        let mut breakdown = ScoreBreakdown::default();

        let hot_hits = self
            .config
            .hot_keywords
            .iter()
            .filter(|kw| message.contains(kw.as_str()))
            .count() as u32;
        breakdown.hot_keywords = hot_hits * self.config.hot_keyword_bonus;

        let warm_hits = self
            .config
            .warm_keywords
            .iter()
            .filter(|kw| message.contains(kw.as_str()))
            .count() as u32;
        breakdown.warm_keywords = warm_hits * self.config.warm_keyword_bonus;

        if metadata.pages_count() >= self.config.pages_threshold {
            breakdown.pages = self.config.pages_bonus;
        }

        if metadata.visit_count >= self.config.visits_threshold {
            breakdown.visits = self.config.visits_bonus;
        }

        if metadata.time_on_site_secs >= self.config.time_threshold_secs {
            breakdown.time_on_site = self.config.time_bonus;
        }

        breakdown.urgency = match metadata.urgency {
            Urgency::High => self.config.urgency_high_bonus,
            Urgency::Medium => self.config.urgency_medium_bonus,
            Urgency::Low | Urgency::Unset => 0,
        };

        if spam_flagged {
            breakdown.spam_penalty = -(self.config.spam_penalty as i32);
        }

        let raw = self.config.base_score as i64
            + breakdown.hot_keywords as i64
            + breakdown.warm_keywords as i64
            + breakdown.pages as i64
            + breakdown.visits as i64
            + breakdown.time_on_site as i64
            + breakdown.urgency as i64
            + breakdown.spam_penalty as i64;
        let total = raw.clamp(0, 100) as u32;

        let qualification = self.qualification(total);
        let contact_window = match qualification {
            Qualification::Hot => ContactWindow::TwoHours,
            Qualification::Warm => ContactWindow::OneDay,
            Qualification::Cold => ContactWindow::TwoDays,
        };

        LeadScore {
            total,
            qualification,
            contact_window,
            breakdown,
        }
    }

    fn qualification(&self, total: u32) -> Qualification {
        if total >= self.config.hot_threshold {
            Qualification::Hot
        } else if total >= self.config.warm_threshold {
            Qualification::Warm
        } else {
            Qualification::Cold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> LeadScorer {
        LeadScorer::new(&ScoringConfig::default())
    }

    fn engaged_visitor() -> VisitorMetadata {
        VisitorMetadata {
            visit_count: 4,
            time_on_site_secs: 360,
            urgency: Urgency::High,
            ..Default::default()
        }
    }

    #[test]
    fn test_hot_sales_scenario() {
        // visitCount 4, six minutes on site, High urgency
        let score = scorer().score(
            "I need pricing for your WhatsApp bot",
            &engaged_visitor(),
            false,
        );
        // base 50 + hot kw 30 + visits 20 + time 10 + urgency 10, clamped
        assert_eq!(score.total, 100);
        assert_eq!(score.qualification, Qualification::Hot);
        assert_eq!(score.contact_window, ContactWindow::TwoHours);
    }

    #[test]
    fn test_base_only_is_warm() {
        let score = scorer().score("nothing relevant", &VisitorMetadata::default(), false);
        assert_eq!(score.total, 50);
        assert_eq!(score.qualification, Qualification::Warm);
        assert_eq!(score.contact_window, ContactWindow::OneDay);
    }

    #[test]
    fn test_spam_penalty_drops_to_cold() {
        let score = scorer().score("nothing relevant", &VisitorMetadata::default(), true);
        assert_eq!(score.total, 30);
        assert_eq!(score.qualification, Qualification::Cold);
        assert_eq!(score.contact_window, ContactWindow::TwoDays);
        assert_eq!(score.breakdown.spam_penalty, -20);
    }

    #[test]
    fn test_hot_keywords_accumulate_uncapped() {
        let s = scorer();
        let one = s.score("pricing please", &VisitorMetadata::default(), false);
        let two = s.score("pricing and a demo please", &VisitorMetadata::default(), false);
        assert!(two.breakdown.hot_keywords > one.breakdown.hot_keywords);
        assert!(two.total >= one.total);
    }

    #[test]
    fn test_monotonic_in_each_bonus() {
        let s = scorer();
        let base = s.score("hello", &VisitorMetadata::default(), false);

        let mut pages = VisitorMetadata::default();
        pages.pages_visited = (0..5).map(|i| format!("/p{}", i)).collect();
        assert!(s.score("hello", &pages, false).total >= base.total);

        let visits = VisitorMetadata {
            visit_count: 3,
            ..Default::default()
        };
        assert!(s.score("hello", &visits, false).total >= base.total);

        let urgent = VisitorMetadata {
            urgency: Urgency::Medium,
            ..Default::default()
        };
        assert!(s.score("hello", &urgent, false).total >= base.total);
    }

    #[test]
    fn test_clamped_to_hundred() {
        let score = scorer().score(
            "buy purchase pricing quote demo urgent",
            &engaged_visitor(),
            false,
        );
        assert_eq!(score.total, 100);
    }

    #[test]
    fn test_threshold_boundaries() {
        let s = scorer();
        // Exactly at warm threshold
        assert_eq!(s.qualification(50), Qualification::Warm);
        assert_eq!(s.qualification(49), Qualification::Cold);
        // Exactly at hot threshold
        assert_eq!(s.qualification(75), Qualification::Hot);
        assert_eq!(s.qualification(74), Qualification::Warm);
    }

    #[test]
    fn test_breakdown_records_components() {
        let score = scorer().score("pricing", &engaged_visitor(), false);
        assert_eq!(score.breakdown.hot_keywords, 30);
        assert_eq!(score.breakdown.visits, 20);
        assert_eq!(score.breakdown.time_on_site, 10);
        assert_eq!(score.breakdown.urgency, 10);
        assert_eq!(score.breakdown.pages, 0);
        assert_eq!(score.breakdown.spam_penalty, 0);
    }

    #[test]
    fn test_custom_thresholds_respected() {
        let config = ScoringConfig {
            hot_threshold: 60,
            warm_threshold: 30,
            ..Default::default()
        };
        let s = LeadScorer::new(&config);
        let score = s.score("pricing", &VisitorMetadata::default(), false);
        // base 50 + hot kw 30 = 80 >= 60
        assert_eq!(score.qualification, Qualification::Hot);
    }
}
