//! Trait seams between the triage pipeline and its collaborators
//!
//! The engine depends only on these traits; the server wires in concrete
//! implementations (in-memory history, Zoho CRM, helpdesk) at startup.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CollaboratorError;
use crate::lead::LeadScore;
use crate::message::VisitorMetadata;
use crate::mode::ModeTag;
use crate::routing::{Priority, Team};
use crate::spam::HistoryEntry;

/// Per-sender message history used by the spam detector
///
/// Implementations keep a bounded recent window plus a cumulative counter;
/// `recent` returns entries in arrival order, oldest first.
pub trait MessageHistory: Send + Sync {
    /// Recent messages for a sender, oldest first
    fn recent(&self, sender_id: &str) -> Vec<HistoryEntry>;

    /// Cumulative count of messages ever seen from a sender
    fn total_count(&self, sender_id: &str) -> u64;

    /// Record a message after the spam check has run against prior history
    fn record(&self, sender_id: &str, text: &str, at: DateTime<Utc>);
}

/// A qualified lead ready to be pushed to the CRM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub visitor: VisitorMetadata,
    pub score: LeadScore,
    /// Original message text, recorded on the lead for context
    pub message_text: String,
}

/// Outcome of a lead push
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadReceipt {
    /// CRM record id
    pub lead_id: String,
    /// True when an existing record was updated instead of created
    pub updated_existing: bool,
}

/// Destination for qualified leads (CRM)
#[async_trait]
pub trait LeadSink: Send + Sync {
    async fn create_or_update_lead(
        &self,
        submission: &LeadSubmission,
    ) -> Result<LeadReceipt, CollaboratorError>;
}

/// A support/billing/technical ticket to be opened
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketRequest {
    pub team: Team,
    pub priority: Priority,
    pub subject: String,
    pub body: String,
    pub requester_email: Option<String>,
}

/// Outcome of a ticket creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketReceipt {
    pub ticket_id: String,
}

/// Destination for customer-facing tickets (helpdesk)
#[async_trait]
pub trait TicketSink: Send + Sync {
    async fn create_ticket(
        &self,
        request: &TicketRequest,
    ) -> Result<TicketReceipt, CollaboratorError>;
}

/// Inputs available when composing the acknowledgement reply
#[derive(Debug, Clone)]
pub struct ReplyContext<'a> {
    pub visitor_name: Option<&'a str>,
    pub team: Option<Team>,
    pub score: Option<&'a LeadScore>,
}

/// Composes the immediate acknowledgement shown in the widget
pub trait ReplyGenerator: Send + Sync {
    fn reply_for(&self, mode: ModeTag, context: &ReplyContext<'_>) -> String;
}
