//! Configuration management for the triage service
//!
//! Two layers of configuration:
//! - Operational settings (`Settings`): server, observability, collaborators.
//!   Loaded from config/default.yaml plus an optional per-environment file,
//!   overridable via CHAT_TRIAGE_-prefixed environment variables.
//! - Triage rules (`TriageConfig`): keyword tables, scoring magnitudes, spam
//!   thresholds. Loaded from config/triage.yaml and hot-reloadable at runtime
//!   via the admin endpoint.

pub mod keywords;
pub mod scoring;
pub mod settings;
pub mod spam;
pub mod triage;

pub use keywords::{KeywordTable, KeywordsConfig, MatchStrictness};
pub use scoring::ScoringConfig;
pub use settings::{
    load_settings, CollaboratorsConfig, CrmConfig, HelpdeskConfig, HistoryConfig,
    ObservabilityConfig, RuntimeEnvironment, ServerConfig, Settings,
};
pub use spam::SpamConfig;
pub use triage::TriageConfig;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
