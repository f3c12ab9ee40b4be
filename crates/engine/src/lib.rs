//! Message triage engine
//!
//! Four pure building blocks and their composition:
//! - `classifier`: keyword-table mode classification
//! - `scorer`: lead scoring and qualification
//! - `spam`: ordered heuristic spam rules over sender history
//! - `router`: mode + score to team/priority mapping
//! - `triage`: the composing `TriageEngine`
//!
//! Everything here is synchronous and stateless apart from the injected
//! message history; all thresholds and keyword tables come from
//! `chat-triage-config` and are never hardcoded.

pub mod classifier;
pub mod router;
pub mod scorer;
pub mod spam;
pub mod triage;

pub use classifier::ModeClassifier;
pub use router::route;
pub use scorer::LeadScorer;
pub use spam::SpamDetector;
pub use triage::{TriageEngine, TriageOutcome};
