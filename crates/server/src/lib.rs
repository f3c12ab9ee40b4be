//! Chat Triage Server
//!
//! HTTP surface for the triage engine: message intake, health/readiness,
//! Prometheus metrics, and admin config reload.

pub mod history;
pub mod http;
pub mod metrics;
pub mod reply;
pub mod state;

pub use history::InMemoryMessageHistory;
pub use http::create_router;
pub use metrics::{
    init_metrics, record_collaborator_outcome, record_lead_qualification, record_spam_rejection,
    record_triage,
};
pub use reply::TemplateReplyGenerator;
pub use state::AppState;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

use chat_triage_config::ServerConfig;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ServerError> for axum::http::StatusCode {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::Config(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Socket address from the configured host and port. An unparseable host
/// falls back to all interfaces rather than refusing to start.
pub fn resolve_bind_addr(server: &ServerConfig) -> SocketAddr {
    let ip = server.host.parse::<IpAddr>().unwrap_or_else(|_| {
        tracing::warn!(host = %server.host, "invalid bind host, using 0.0.0.0");
        IpAddr::V4(Ipv4Addr::UNSPECIFIED)
    });
    SocketAddr::new(ip, server.port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_uses_configured_host() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
            ..Default::default()
        };
        assert_eq!(resolve_bind_addr(&server), "127.0.0.1:9000".parse().unwrap());
    }

    #[test]
    fn test_bind_addr_falls_back_on_garbage_host() {
        let server = ServerConfig {
            host: "not-an-ip".to_string(),
            port: 8080,
            ..Default::default()
        };
        assert_eq!(resolve_bind_addr(&server), "0.0.0.0:8080".parse().unwrap());
    }
}
