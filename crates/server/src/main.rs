//! Chat triage server binary

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use chat_triage_config::{load_settings, Settings, TriageConfig};
use chat_triage_crm::{HelpdeskClient, LeadService};
use chat_triage_server::http::create_router;
use chat_triage_server::metrics::init_metrics;
use chat_triage_server::resolve_bind_addr;
use chat_triage_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::var("CHAT_TRIAGE_ENV").ok();

    let settings = match load_settings(env.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to load settings ({}), using defaults", e);
            Settings::default()
        }
    };

    init_tracing(&settings);
    if settings.observability.metrics_enabled {
        init_metrics();
    } else {
        tracing::info!("metrics disabled, /metrics will answer 503");
    }

    tracing::info!(
        environment = ?settings.environment,
        version = env!("CARGO_PKG_VERSION"),
        "starting chat-triage server"
    );

    let triage = match TriageConfig::load(&settings.triage_config_path) {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(
                path = %settings.triage_config_path,
                error = %e,
                "triage config not loadable, falling back to built-in defaults"
            );
            TriageConfig::default()
        }
    };

    let mut state = AppState::new(settings.clone(), &triage).with_env(env);

    if settings.collaborators.crm.enabled {
        state = state.with_lead_sink(Arc::new(LeadService::new(&settings.collaborators.crm)?));
        tracing::info!("CRM lead sink wired");
    } else {
        tracing::info!("CRM collaborator disabled, leads will not be pushed");
    }

    if settings.collaborators.helpdesk.enabled {
        state = state
            .with_ticket_sink(Arc::new(HelpdeskClient::new(&settings.collaborators.helpdesk)?));
        tracing::info!("Helpdesk ticket sink wired");
    } else {
        tracing::info!("Helpdesk collaborator disabled, tickets will not be created");
    }

    let app = create_router(state);

    let addr = resolve_bind_addr(&settings.server);
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(settings: &Settings) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "chat_triage={level},tower_http=debug",
            level = settings.observability.log_level
        ))
    });

    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
