//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// External collaborator configuration (CRM, helpdesk)
    #[serde(default)]
    pub collaborators: CollaboratorsConfig,

    /// Per-sender message history retention
    #[serde(default)]
    pub history: HistoryConfig,

    /// Path to the triage rules file (keyword tables, scoring, spam)
    #[serde(default = "default_triage_config_path")]
    pub triage_config_path: String,
}

fn default_triage_config_path() -> String {
    "config/triage.yaml".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: RuntimeEnvironment::default(),
            server: ServerConfig::default(),
            observability: ObservabilityConfig::default(),
            collaborators: CollaboratorsConfig::default(),
            history: HistoryConfig::default(),
            triage_config_path: default_triage_config_path(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_collaborators()?;
        self.validate_history()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        let server = &self.server;

        if server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if server.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        if self.environment.is_production() && server.cors_enabled && server.cors_origins.is_empty()
        {
            tracing::warn!(
                "CORS is enabled in production but no origins are configured. \
                 This may block legitimate requests."
            );
        }

        Ok(())
    }

    fn validate_collaborators(&self) -> Result<(), ConfigError> {
        let crm = &self.collaborators.crm;

        if crm.enabled {
            if crm.refresh_token.is_empty() && self.environment.is_strict() {
                return Err(ConfigError::InvalidValue {
                    field: "collaborators.crm.refresh_token".to_string(),
                    message: "Refresh token must be set when CRM is enabled".to_string(),
                });
            }
            if crm.client_id.is_empty() || crm.client_secret.is_empty() {
                if self.environment.is_strict() {
                    return Err(ConfigError::InvalidValue {
                        field: "collaborators.crm.client_id".to_string(),
                        message: "Client credentials must be set when CRM is enabled".to_string(),
                    });
                }
                tracing::warn!("CRM enabled without client credentials (required for production)");
            }
            if crm.max_retries == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "collaborators.crm.max_retries".to_string(),
                    message: "Must be at least 1".to_string(),
                });
            }
        }

        let helpdesk = &self.collaborators.helpdesk;
        if helpdesk.enabled && helpdesk.api_token.is_empty() && self.environment.is_strict() {
            return Err(ConfigError::InvalidValue {
                field: "collaborators.helpdesk.api_token".to_string(),
                message: "API token must be set when helpdesk is enabled".to_string(),
            });
        }

        Ok(())
    }

    fn validate_history(&self) -> Result<(), ConfigError> {
        if self.history.window_entries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.window_entries".to_string(),
                message: "Window must hold at least 1 entry".to_string(),
            });
        }

        if self.history.window_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.window_seconds".to_string(),
                message: "Window must span at least 1 second".to_string(),
            });
        }

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_timeout() -> u64 {
    30
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_timeout(),
            cors_enabled: default_true(),
            // Empty by default - must be explicitly configured for production
            cors_origins: Vec::new(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Enable metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// External collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CollaboratorsConfig {
    /// CRM (lead destination)
    #[serde(default)]
    pub crm: CrmConfig,

    /// Helpdesk (ticket destination)
    #[serde(default)]
    pub helpdesk: HelpdeskConfig,
}

/// Zoho CRM collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmConfig {
    /// Enable lead pushes (false = decisions computed but not dispatched)
    #[serde(default)]
    pub enabled: bool,

    /// CRM API base URL
    #[serde(default = "default_crm_api_base")]
    pub api_base: String,

    /// OAuth accounts server URL (token refresh)
    #[serde(default = "default_crm_accounts_base")]
    pub accounts_base: String,

    /// OAuth client id (set via CHAT_TRIAGE_COLLABORATORS__CRM__CLIENT_ID)
    #[serde(default)]
    pub client_id: String,

    /// OAuth client secret
    #[serde(default)]
    pub client_secret: String,

    /// Long-lived refresh token
    #[serde(default)]
    pub refresh_token: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_collaborator_timeout")]
    pub timeout_seconds: u64,

    /// Attempts per operation before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay for exponential backoff between attempts
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
}

fn default_crm_api_base() -> String {
    "https://www.zohoapis.in/crm/v2".to_string()
}
fn default_crm_accounts_base() -> String {
    "https://accounts.zoho.in".to_string()
}
fn default_collaborator_timeout() -> u64 {
    10
}
fn default_max_retries() -> u32 {
    3
}
fn default_retry_base_delay_ms() -> u64 {
    500
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            enabled: false, // Disabled by default for development
            api_base: default_crm_api_base(),
            accounts_base: default_crm_accounts_base(),
            client_id: String::new(),
            client_secret: String::new(),
            refresh_token: String::new(),
            timeout_seconds: default_collaborator_timeout(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
        }
    }
}

/// Helpdesk collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpdeskConfig {
    /// Enable ticket creation
    #[serde(default)]
    pub enabled: bool,

    /// Helpdesk API base URL
    #[serde(default)]
    pub api_base: String,

    /// API token (set via CHAT_TRIAGE_COLLABORATORS__HELPDESK__API_TOKEN)
    #[serde(default)]
    pub api_token: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_collaborator_timeout")]
    pub timeout_seconds: u64,
}

impl Default for HelpdeskConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_base: String::new(),
            api_token: String::new(),
            timeout_seconds: default_collaborator_timeout(),
        }
    }
}

/// Per-sender message history retention
///
/// The spam detector queries a bounded recent window per sender; both bounds
/// apply (whichever trims more).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum entries kept per sender
    #[serde(default = "default_window_entries")]
    pub window_entries: usize,

    /// Maximum age of a kept entry in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,
}

fn default_window_entries() -> usize {
    20
}
fn default_window_seconds() -> u64 {
    300
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            window_entries: default_window_entries(),
            window_seconds: default_window_seconds(),
        }
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (CHAT_TRIAGE_ prefix)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("CHAT_TRIAGE")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
