//! Routing decision types
//!
//! A RoutingDecision is produced once per message, never mutated, and
//! consumed immediately by the external collaborators.

use serde::{Deserialize, Serialize};

use crate::lead::LeadScore;
use crate::mode::ModeTag;

/// Internal team a message can be routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Sales,
    Billing,
    Support,
    Technical,
}

impl Team {
    pub fn as_str(&self) -> &'static str {
        match self {
            Team::Sales => "sales",
            Team::Billing => "billing",
            Team::Support => "support",
            Team::Technical => "technical",
        }
    }
}

/// Handling priority for the assigned team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// What the server layer should do with the decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Create a customer-facing ticket (and a CRM lead for sales)
    Ticket,
    /// Handled internally, no customer-facing ticket
    Internal,
    /// Terminal rejection, no side effects at all
    Reject,
}

/// Final team/priority assignment for a classified message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub mode: ModeTag,
    /// Absent for spam and internally handled modes
    pub team: Option<Team>,
    pub priority: Priority,
    /// Present only for lead-bearing modes
    pub score: Option<LeadScore>,
    pub disposition: Disposition,
}

impl RoutingDecision {
    /// True when lead/ticket creation must be suppressed
    pub fn is_terminal_reject(&self) -> bool {
        matches!(self.disposition, Disposition::Reject)
    }
}
