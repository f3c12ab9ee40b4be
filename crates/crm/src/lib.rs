//! External collaborator clients
//!
//! Zoho CRM (lead destination) and the helpdesk (ticket destination), both
//! behind the `chat-triage-core` trait seams. Failures here never change a
//! routing decision; the server surfaces them as structured side-effect
//! results.

pub mod helpdesk;
pub mod service;
pub mod zoho;

pub use helpdesk::HelpdeskClient;
pub use service::LeadService;
pub use zoho::ZohoCrmClient;
