//! Error types shared across the workspace
//!
//! The triage functions themselves are total and never fail for business
//! conditions; errors here cover the boundary with external collaborators.

use thiserror::Error;

/// Failure from an external collaborator (CRM, helpdesk, reply generation)
///
/// A collaborator failure never changes the RoutingDecision already computed;
/// it is surfaced to the caller as a structured result and to the end user as
/// a generic fallback message.
#[derive(Error, Debug)]
pub enum CollaboratorError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Unexpected response ({status}): {body}")]
    UnexpectedResponse { status: u16, body: String },

    #[error("Collaborator disabled")]
    Disabled,
}
