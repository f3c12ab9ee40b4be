//! TriageEngine - the composed pipeline
//!
//! Spam check against prior history, then record, then classify, score
//! (sales only), and route. Recording happens here so arrival order is
//! preserved for the sender's later messages.

use serde::Serialize;

use chat_triage_core::{
    InboundMessage, MessageHistory, ModeTag, RoutingDecision, SpamVerdict, VisitorMetadata,
};
use chat_triage_config::TriageConfig;

use crate::classifier::ModeClassifier;
use crate::router::route;
use crate::scorer::LeadScorer;
use crate::spam::SpamDetector;

/// Decision plus the spam verdict that shaped it
#[derive(Debug, Clone, Serialize)]
pub struct TriageOutcome {
    pub decision: RoutingDecision,
    pub spam: SpamVerdict,
}

/// One immutable engine built from a validated `TriageConfig`.
///
/// Cheap to rebuild; config reload swaps the whole engine rather than
/// mutating it in place.
#[derive(Debug, Clone)]
pub struct TriageEngine {
    classifier: ModeClassifier,
    scorer: LeadScorer,
    spam: SpamDetector,
}

impl TriageEngine {
    pub fn new(config: &TriageConfig) -> Self {
        Self {
            classifier: ModeClassifier::new(&config.keywords, &config.spam),
            scorer: LeadScorer::new(&config.scoring),
            spam: SpamDetector::new(&config.spam),
        }
    }

    /// Run the full pipeline for one message.
    pub fn triage(
        &self,
        message: &InboundMessage,
        metadata: &VisitorMetadata,
        history: &dyn MessageHistory,
    ) -> TriageOutcome {
        let verdict = self.spam.check(message, history);
        history.record(&message.sender_id, &message.text, message.timestamp);

        let mode = if verdict.flagged {
            ModeTag::Spam
        } else {
            self.classifier.classify(&message.text, metadata)
        };

        let score = if mode.is_lead_bearing() {
            Some(self.scorer.score(&message.text, metadata, verdict.flagged))
        } else {
            None
        };

        let decision = route(mode, score, metadata.urgency);

        tracing::info!(
            sender = %message.sender_id,
            mode = %decision.mode,
            priority = decision.priority.as_str(),
            spam = verdict.flagged,
            "message triaged"
        );

        TriageOutcome {
            decision,
            spam: verdict,
        }
    }
}
