//! Prometheus metrics
//!
//! Counters for triage outcomes and collaborator calls, rendered at
//! /metrics via the recorder handle.

use axum::http::StatusCode;
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use chat_triage_core::{Priority, Qualification, SpamRule};

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder. Idempotent; later calls keep the first
/// recorder.
pub fn init_metrics() -> Option<&'static PrometheusHandle> {
    let handle = PROMETHEUS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;

        describe_counter!(
            "triage_messages_total",
            "Messages triaged, labeled by mode and priority"
        );
        describe_counter!(
            "triage_spam_rejections_total",
            "Messages rejected as spam, labeled by rule"
        );
        describe_counter!(
            "triage_lead_qualifications_total",
            "Lead scores computed, labeled by qualification"
        );
        describe_counter!(
            "triage_collaborator_calls_total",
            "Collaborator calls, labeled by kind and outcome"
        );

        Ok::<_, metrics_exporter_prometheus::BuildError>(handle)
    });

    match handle {
        Ok(h) => Some(h),
        Err(e) => {
            tracing::warn!(error = %e, "failed to install metrics recorder");
            None
        }
    }
}

/// Render the current metrics snapshot
pub async fn metrics_handler() -> Result<String, StatusCode> {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)
}

pub fn record_triage(mode: &str, priority: Priority) {
    counter!(
        "triage_messages_total",
        "mode" => mode.to_string(),
        "priority" => priority.as_str()
    )
    .increment(1);
}

pub fn record_spam_rejection(rule: Option<SpamRule>) {
    counter!(
        "triage_spam_rejections_total",
        "rule" => rule.map(|r| r.as_str()).unwrap_or("gibberish")
    )
    .increment(1);
}

pub fn record_lead_qualification(qualification: Qualification) {
    counter!(
        "triage_lead_qualifications_total",
        "qualification" => qualification.as_str()
    )
    .increment(1);
}

pub fn record_collaborator_outcome(kind: &'static str, ok: bool) {
    counter!(
        "triage_collaborator_calls_total",
        "kind" => kind,
        "outcome" => if ok { "ok" } else { "error" }
    )
    .increment(1);
}
