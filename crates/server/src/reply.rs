//! Template-based acknowledgement replies
//!
//! Free-text reply generation is an external collaborator by contract; this
//! default keeps the widget responsive with per-mode templates. Downstream
//! failures always fall back to the generic connect-with-team message, never
//! a technical error.

use chat_triage_core::{ModeTag, Qualification, ReplyContext, ReplyGenerator};

/// Shown when a downstream side effect fails
pub const FALLBACK_REPLY: &str =
    "Thanks for reaching out! Our team will connect with you shortly.";

pub struct TemplateReplyGenerator;

impl TemplateReplyGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TemplateReplyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyGenerator for TemplateReplyGenerator {
    fn reply_for(&self, mode: ModeTag, context: &ReplyContext<'_>) -> String {
        let greeting = match context.visitor_name {
            Some(name) => format!("Thanks, {}! ", name),
            None => "Thanks for reaching out! ".to_string(),
        };

        let body = match mode {
            ModeTag::Sales => match context.score.map(|s| s.qualification) {
                Some(Qualification::Hot) => {
                    "Our sales team will contact you within the next couple of hours."
                }
                Some(Qualification::Warm) => {
                    "Our sales team will get back to you within a day."
                }
                _ => "Our sales team will be in touch soon.",
            },
            ModeTag::Billing => "We've raised this with our billing team.",
            ModeTag::Technical => "Our technical team is looking into this.",
            ModeTag::Support | ModeTag::Faq => {
                "Our support team will get back to you with an answer."
            }
            ModeTag::Internal | ModeTag::Analytics => "Noted.",
            ModeTag::Spam => return String::new(),
        };

        format!("{}{}", greeting, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_triage_core::{ContactWindow, LeadScore, ScoreBreakdown};

    fn hot_score() -> LeadScore {
        LeadScore {
            total: 85,
            qualification: Qualification::Hot,
            contact_window: ContactWindow::TwoHours,
            breakdown: ScoreBreakdown::default(),
        }
    }

    #[test]
    fn test_personalized_sales_reply() {
        let score = hot_score();
        let context = ReplyContext {
            visitor_name: Some("Prithivi"),
            team: None,
            score: Some(&score),
        };
        let reply = TemplateReplyGenerator::new().reply_for(ModeTag::Sales, &context);
        assert!(reply.starts_with("Thanks, Prithivi!"));
        assert!(reply.contains("couple of hours"));
    }

    #[test]
    fn test_anonymous_reply() {
        let context = ReplyContext {
            visitor_name: None,
            team: None,
            score: None,
        };
        let reply = TemplateReplyGenerator::new().reply_for(ModeTag::Billing, &context);
        assert!(reply.starts_with("Thanks for reaching out!"));
        assert!(reply.contains("billing"));
    }

    #[test]
    fn test_spam_gets_no_reply() {
        let context = ReplyContext {
            visitor_name: Some("Anyone"),
            team: None,
            score: None,
        };
        assert!(TemplateReplyGenerator::new()
            .reply_for(ModeTag::Spam, &context)
            .is_empty());
    }
}
