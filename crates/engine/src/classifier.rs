//! Mode classifier
//!
//! First-match over the ordered keyword tables, then a gibberish heuristic,
//! then the Support fallback. Priority lives in the table order, not in
//! nested conditionals, so the ordering invariant is testable on its own.

use unicode_segmentation::UnicodeSegmentation;

use chat_triage_core::{ModeTag, VisitorMetadata};
use chat_triage_config::{KeywordsConfig, MatchStrictness, SpamConfig};

/// Entire-message lowercase runs at or past this length read as bot gibberish
const GIBBERISH_RUN_LEN: usize = 10;

/// Assigns exactly one `ModeTag` per message
#[derive(Debug, Clone)]
pub struct ModeClassifier {
    /// (mode, lowercase triggers) in priority order
    tables: Vec<(ModeTag, Vec<String>)>,
    matching: MatchStrictness,
    /// Shared with the spam detector's short rule
    min_length: usize,
}

impl ModeClassifier {
    pub fn new(keywords: &KeywordsConfig, spam: &SpamConfig) -> Self {
        let tables = keywords
            .tables
            .iter()
            .map(|t| (t.mode, t.triggers.clone()))
            .collect();

        Self {
            tables,
            matching: keywords.matching,
            min_length: spam.min_length,
        }
    }

    /// Classify a message. Total function, always returns a tag.
    ///
    /// The declared requirement text is a secondary match source: a visitor
    /// who typed "hi" in the widget but filled "need a WhatsApp bot" into the
    /// form still routes on intent.
    pub fn classify(&self, text: &str, metadata: &VisitorMetadata) -> ModeTag {
        let message = text.to_lowercase();
        let requirement = metadata.requirement.as_deref().map(str::to_lowercase);

        for (mode, triggers) in &self.tables {
            let hit = triggers.iter().any(|trigger| {
                self.matches(&message, trigger)
                    || requirement
                        .as_deref()
                        .is_some_and(|r| self.matches(r, trigger))
            });
            if hit {
                tracing::debug!(mode = %mode, "keyword table matched");
                return *mode;
            }
        }

        if self.looks_like_gibberish(text) {
            return ModeTag::Spam;
        }

        ModeTag::Support
    }

    fn matches(&self, haystack: &str, trigger: &str) -> bool {
        match self.matching {
            MatchStrictness::Substring => haystack.contains(trigger),
            MatchStrictness::WordBoundary => {
                let words: Vec<&str> = haystack.unicode_words().collect();
                let trigger_words: Vec<&str> = trigger.unicode_words().collect();
                if trigger_words.is_empty() {
                    return false;
                }
                words
                    .windows(trigger_words.len())
                    .any(|w| w == trigger_words.as_slice())
            }
        }
    }

    /// Length rule plus the lowercase-run proxy for bot-generated text
    fn looks_like_gibberish(&self, text: &str) -> bool {
        let trimmed = text.trim();
        let len = trimmed.chars().count();

        if len < self.min_length {
            return true;
        }

        len >= GIBBERISH_RUN_LEN && trimmed.chars().all(|c| c.is_lowercase() && c.is_alphabetic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_triage_config::TriageConfig;

    fn classifier() -> ModeClassifier {
        let config = TriageConfig::default();
        ModeClassifier::new(&config.keywords, &config.spam)
    }

    #[test]
    fn test_sales_inquiry() {
        let c = classifier();
        assert_eq!(
            c.classify(
                "I need pricing for your WhatsApp bot",
                &VisitorMetadata::default()
            ),
            ModeTag::Sales
        );
    }

    #[test]
    fn test_billing_inquiry() {
        let c = classifier();
        assert_eq!(
            c.classify("My invoice charge is wrong", &VisitorMetadata::default()),
            ModeTag::Billing
        );
    }

    #[test]
    fn test_internal_wins_over_other_matches() {
        let c = classifier();
        // Contains sales ("pricing") and billing ("invoice") triggers too
        assert_eq!(
            c.classify(
                "#escalate pricing dispute on invoice 42",
                &VisitorMetadata::default()
            ),
            ModeTag::Internal
        );
    }

    #[test]
    fn test_short_message_is_spam() {
        let c = classifier();
        assert_eq!(c.classify("hi", &VisitorMetadata::default()), ModeTag::Spam);
        assert_eq!(c.classify("", &VisitorMetadata::default()), ModeTag::Spam);
    }

    #[test]
    fn test_lowercase_run_is_spam() {
        let c = classifier();
        assert_eq!(
            c.classify("asdkfjhaksdjfhakjsdhf", &VisitorMetadata::default()),
            ModeTag::Spam
        );
    }

    #[test]
    fn test_unmatched_falls_back_to_support() {
        let c = classifier();
        assert_eq!(
            c.classify(
                "my account page looks odd today",
                &VisitorMetadata::default()
            ),
            ModeTag::Support
        );
    }

    #[test]
    fn test_requirement_text_routes_when_message_is_generic() {
        let c = classifier();
        let metadata = VisitorMetadata {
            requirement: Some("Need a demo of the WhatsApp bot".to_string()),
            ..Default::default()
        };
        assert_eq!(c.classify("hello there", &metadata), ModeTag::Sales);
    }

    #[test]
    fn test_substring_matches_inside_words() {
        // "how" inside "showroom" - deliberate substring semantics
        let c = classifier();
        assert_eq!(
            c.classify("visit our showroom", &VisitorMetadata::default()),
            ModeTag::Faq
        );
    }

    #[test]
    fn test_word_boundary_mode_avoids_embedded_matches() {
        let mut config = TriageConfig::default();
        config.keywords.matching = MatchStrictness::WordBoundary;
        let c = ModeClassifier::new(&config.keywords, &config.spam);

        assert_eq!(
            c.classify("visit our showroom", &VisitorMetadata::default()),
            ModeTag::Support
        );
        assert_eq!(
            c.classify("how does this work", &VisitorMetadata::default()),
            ModeTag::Faq
        );
    }

    #[test]
    fn test_mixed_case_message_matches() {
        let c = classifier();
        assert_eq!(
            c.classify("PRICING please", &VisitorMetadata::default()),
            ModeTag::Sales
        );
    }
}
