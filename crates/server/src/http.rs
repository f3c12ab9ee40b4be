//! HTTP endpoints
//!
//! REST API for message triage.

use axum::{
    extract::{Json, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use chat_triage_core::{
    InboundMessage, LeadSubmission, ReplyContext, TicketRequest, VisitorMetadata,
};
use chat_triage_engine::TriageOutcome;

use crate::metrics::{
    metrics_handler, record_collaborator_outcome, record_lead_qualification,
    record_spam_rejection, record_triage,
};
use crate::reply::FALLBACK_REPLY;
use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let settings = state.settings.read();
    let cors_layer = build_cors_layer(&settings.server.cors_origins, settings.server.cors_enabled);
    let request_timeout = Duration::from_secs(settings.server.timeout_seconds);
    drop(settings);

    Router::new()
        // Message intake
        .route("/api/messages", post(handle_message))
        // Health check
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        // Prometheus metrics
        .route("/metrics", get(metrics_handler))
        // Admin endpoints
        .route("/admin/reload-config", post(reload_config))
        .route("/api/triage/info", get(triage_info))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If cors_origins is empty, defaults to localhost:3000 for safety
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No valid CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static("http://localhost:3000"))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    // Wildcard headers cannot be combined with credentials
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Inbound message from the widget
#[derive(Debug, Deserialize)]
struct TriageRequest {
    /// Missing text is treated as empty, which classifies as spam
    #[serde(default)]
    message: String,
    /// Session id or IP
    sender_id: String,
    #[serde(default)]
    visitor: VisitorMetadata,
}

/// Outcome of one downstream side effect
#[derive(Debug, Serialize)]
struct SideEffectStatus {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct SideEffects {
    #[serde(skip_serializing_if = "Option::is_none")]
    lead: Option<SideEffectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ticket: Option<SideEffectStatus>,
}

impl SideEffects {
    fn any_failed(&self) -> bool {
        [self.lead.as_ref(), self.ticket.as_ref()]
            .into_iter()
            .flatten()
            .any(|s| !s.ok)
    }
}

#[derive(Debug, Serialize)]
struct TriageResponse {
    request_id: String,
    #[serde(flatten)]
    outcome: TriageOutcome,
    reply: String,
    side_effects: SideEffects,
}

/// Triage one message and dispatch its side effects.
///
/// The routing decision stands even when a downstream call fails; failures
/// surface as structured side-effect results plus the generic fallback reply.
async fn handle_message(
    State(state): State<AppState>,
    Json(request): Json<TriageRequest>,
) -> Json<TriageResponse> {
    let request_id = Uuid::new_v4().to_string();
    let message = InboundMessage::new(request.message, request.sender_id);

    let engine = state.engine();
    let outcome = engine.triage(&message, &request.visitor, state.history.as_ref());

    record_triage(outcome.decision.mode.as_str(), outcome.decision.priority);
    if outcome.decision.is_terminal_reject() {
        record_spam_rejection(outcome.spam.rule);
    }
    if let Some(score) = &outcome.decision.score {
        record_lead_qualification(score.qualification);
    }

    let side_effects = dispatch_side_effects(&state, &message, &request.visitor, &outcome).await;

    let reply = if outcome.decision.is_terminal_reject() {
        String::new()
    } else if side_effects.any_failed() {
        FALLBACK_REPLY.to_string()
    } else {
        let context = ReplyContext {
            visitor_name: request.visitor.name.as_deref(),
            team: outcome.decision.team,
            score: outcome.decision.score.as_ref(),
        };
        state.replies.reply_for(outcome.decision.mode, &context)
    };

    Json(TriageResponse {
        request_id,
        outcome,
        reply,
        side_effects,
    })
}

/// Lead push for sales, ticket creation for team-bound modes. Spam and
/// internally handled modes produce no side effects.
async fn dispatch_side_effects(
    state: &AppState,
    message: &InboundMessage,
    visitor: &VisitorMetadata,
    outcome: &TriageOutcome,
) -> SideEffects {
    let mut effects = SideEffects::default();
    let decision = &outcome.decision;

    if decision.is_terminal_reject() || decision.team.is_none() {
        return effects;
    }

    if let (Some(score), Some(sink)) = (&decision.score, &state.lead_sink) {
        let submission = LeadSubmission {
            visitor: visitor.clone(),
            score: score.clone(),
            message_text: message.text.clone(),
        };

        effects.lead = Some(match sink.create_or_update_lead(&submission).await {
            Ok(receipt) => {
                record_collaborator_outcome("crm_lead", true);
                SideEffectStatus {
                    ok: true,
                    id: Some(receipt.lead_id),
                    error: None,
                }
            }
            Err(e) => {
                record_collaborator_outcome("crm_lead", false);
                tracing::error!(error = %e, "lead push failed");
                SideEffectStatus {
                    ok: false,
                    id: None,
                    error: Some(e.to_string()),
                }
            }
        });
    }

    if let (Some(team), Some(sink)) = (decision.team, &state.ticket_sink) {
        let ticket = TicketRequest {
            team,
            priority: decision.priority,
            subject: format!("{} inquiry from website chat", team.as_str()),
            body: message.text.clone(),
            requester_email: visitor.email.clone(),
        };

        effects.ticket = Some(match sink.create_ticket(&ticket).await {
            Ok(receipt) => {
                record_collaborator_outcome("helpdesk_ticket", true);
                SideEffectStatus {
                    ok: true,
                    id: Some(receipt.ticket_id),
                    error: None,
                }
            }
            Err(e) => {
                record_collaborator_outcome("helpdesk_ticket", false);
                tracing::error!(error = %e, "ticket creation failed");
                SideEffectStatus {
                    ok: false,
                    id: None,
                    error: Some(e.to_string()),
                }
            }
        });
    }

    effects
}

async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let triage_path = state.get_settings().triage_config_path.clone();
    let config_ok = std::path::Path::new(&triage_path).exists();

    let status = if config_ok { "healthy" } else { "degraded" };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": status,
            "version": env!("CARGO_PKG_VERSION"),
            "checks": {
                "triage_config": {
                    "status": if config_ok { "ok" } else { "missing" },
                    "path": triage_path,
                },
                "history": {
                    "status": "ok",
                    "senders": state.history.sender_count(),
                },
            }
        })),
    )
}

async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ready",
            "checks": {
                "crm": if state.lead_sink.is_some() { "wired" } else { "disabled" },
                "helpdesk": if state.ticket_sink.is_some() { "wired" } else { "disabled" },
            }
        })),
    )
}

/// POST /admin/reload-config
///
/// Reloads settings and triage rules from disk. The engine is swapped only
/// when the new rules validate.
async fn reload_config(State(state): State<AppState>) -> impl IntoResponse {
    match state.reload_config() {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "success",
                "message": "Configuration reloaded successfully"
            })),
        ),
        Err(e) => {
            let err = ServerError::Config(e);
            tracing::error!("Config reload failed: {}", err);
            (
                StatusCode::from(err),
                Json(serde_json::json!({
                    "status": "error",
                    "message": "Configuration reload failed, previous config retained"
                })),
            )
        }
    }
}

/// GET /api/triage/info
///
/// Current runtime configuration summary for debugging/monitoring.
async fn triage_info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let settings = state.get_settings();

    Json(serde_json::json!({
        "environment": settings.environment,
        "triage_config_path": settings.triage_config_path,
        "history": {
            "window_entries": settings.history.window_entries,
            "window_seconds": settings.history.window_seconds,
        },
        "collaborators": {
            "crm_enabled": settings.collaborators.crm.enabled,
            "helpdesk_enabled": settings.collaborators.helpdesk.enabled,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_triage_config::{Settings, TriageConfig};

    #[test]
    fn test_router_creation() {
        let state = AppState::new(Settings::default(), &TriageConfig::default());
        let _ = create_router(state);
    }

    #[tokio::test]
    async fn test_handle_message_sales_flow() {
        let state = AppState::new(Settings::default(), &TriageConfig::default());

        let request = TriageRequest {
            message: "I need pricing for your WhatsApp bot".to_string(),
            sender_id: "visitor-1".to_string(),
            visitor: VisitorMetadata {
                visit_count: 4,
                time_on_site_secs: 360,
                urgency: chat_triage_core::Urgency::High,
                ..Default::default()
            },
        };

        let Json(response) = handle_message(State(state), Json(request)).await;
        assert_eq!(response.outcome.decision.mode.as_str(), "sales");
        assert!(!response.reply.is_empty());
        // No sinks wired, so no side effects were attempted
        assert!(response.side_effects.lead.is_none());
        assert!(response.side_effects.ticket.is_none());
    }

    #[tokio::test]
    async fn test_handle_message_spam_gets_empty_reply() {
        let state = AppState::new(Settings::default(), &TriageConfig::default());

        let request = TriageRequest {
            message: String::new(),
            sender_id: "visitor-2".to_string(),
            visitor: VisitorMetadata::default(),
        };

        let Json(response) = handle_message(State(state), Json(request)).await;
        assert!(response.outcome.decision.is_terminal_reject());
        assert!(response.reply.is_empty());
    }

    #[tokio::test]
    async fn test_failed_sink_yields_fallback_reply() {
        use async_trait::async_trait;
        use chat_triage_core::{CollaboratorError, TicketReceipt, TicketSink};
        use std::sync::Arc;

        struct FailingSink;

        #[async_trait]
        impl TicketSink for FailingSink {
            async fn create_ticket(
                &self,
                _request: &TicketRequest,
            ) -> Result<TicketReceipt, CollaboratorError> {
                Err(CollaboratorError::Request("connection refused".to_string()))
            }
        }

        let state = AppState::new(Settings::default(), &TriageConfig::default())
            .with_ticket_sink(Arc::new(FailingSink));

        let request = TriageRequest {
            message: "My invoice charge is wrong".to_string(),
            sender_id: "visitor-3".to_string(),
            visitor: VisitorMetadata::default(),
        };

        let Json(response) = handle_message(State(state), Json(request)).await;
        // Decision stands even though the downstream call failed
        assert_eq!(response.outcome.decision.mode.as_str(), "billing");
        assert_eq!(response.reply, FALLBACK_REPLY);
        let ticket = response.side_effects.ticket.expect("ticket was attempted");
        assert!(!ticket.ok);
    }
}
