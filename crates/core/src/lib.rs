//! Core types for the chat triage service
//!
//! This crate provides foundational types used across all other crates:
//! - Inbound message and visitor metadata
//! - Handling mode tags and the routing decision
//! - Lead score and qualification types
//! - Spam verdict types
//! - Trait seams for external collaborators (history store, CRM, helpdesk)
//! - Error types

pub mod error;
pub mod lead;
pub mod message;
pub mod mode;
pub mod routing;
pub mod spam;
pub mod traits;

pub use error::CollaboratorError;
pub use lead::{ContactWindow, LeadScore, Qualification, ScoreBreakdown};
pub use message::{InboundMessage, Urgency, VisitorMetadata};
pub use mode::ModeTag;
pub use routing::{Disposition, Priority, RoutingDecision, Team};
pub use spam::{HistoryEntry, SpamRule, SpamVerdict};
pub use traits::{
    LeadReceipt, LeadSink, LeadSubmission, MessageHistory, ReplyContext, ReplyGenerator,
    TicketReceipt, TicketRequest, TicketSink,
};
