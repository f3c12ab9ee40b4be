//! Application state
//!
//! Shared across all handlers. Settings and the triage engine sit behind
//! locks so the admin reload endpoint can swap them without a restart.

use std::sync::Arc;

use parking_lot::RwLock;

use chat_triage_core::{LeadSink, ReplyGenerator, TicketSink};
use chat_triage_config::{load_settings, Settings, TriageConfig};
use chat_triage_engine::TriageEngine;

use crate::history::InMemoryMessageHistory;
use crate::reply::TemplateReplyGenerator;

#[derive(Clone)]
pub struct AppState {
    /// Settings wrapped in RwLock for hot-reload support
    pub settings: Arc<RwLock<Settings>>,
    /// Rebuilt wholesale on triage-config reload
    pub engine: Arc<RwLock<Arc<TriageEngine>>>,
    /// Per-sender message history for the spam detector
    pub history: Arc<InMemoryMessageHistory>,
    /// Lead destination, absent when the CRM collaborator is disabled
    pub lead_sink: Option<Arc<dyn LeadSink>>,
    /// Ticket destination, absent when the helpdesk collaborator is disabled
    pub ticket_sink: Option<Arc<dyn TicketSink>>,
    /// Acknowledgement reply composer
    pub replies: Arc<dyn ReplyGenerator>,
    /// Environment name for config reload
    env: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings, triage: &TriageConfig) -> Self {
        let history = Arc::new(InMemoryMessageHistory::new(&settings.history));
        Self {
            engine: Arc::new(RwLock::new(Arc::new(TriageEngine::new(triage)))),
            settings: Arc::new(RwLock::new(settings)),
            history,
            lead_sink: None,
            ticket_sink: None,
            replies: Arc::new(TemplateReplyGenerator::new()),
            env: None,
        }
    }

    pub fn with_env(mut self, env: Option<String>) -> Self {
        self.env = env;
        self
    }

    pub fn with_lead_sink(mut self, sink: Arc<dyn LeadSink>) -> Self {
        self.lead_sink = Some(sink);
        self
    }

    pub fn with_ticket_sink(mut self, sink: Arc<dyn TicketSink>) -> Self {
        self.ticket_sink = Some(sink);
        self
    }

    /// Current engine snapshot; handlers hold the Arc, not the lock
    pub fn engine(&self) -> Arc<TriageEngine> {
        self.engine.read().clone()
    }

    /// Reload settings and triage rules from disk.
    ///
    /// The engine is only swapped when the new triage config validates, so a
    /// broken file on disk never takes down a running server.
    pub fn reload_config(&self) -> Result<(), String> {
        let new_settings =
            load_settings(self.env.as_deref()).map_err(|e| format!("settings reload: {}", e))?;

        let triage = TriageConfig::load(&new_settings.triage_config_path)
            .map_err(|e| format!("triage config reload: {}", e))?;

        *self.engine.write() = Arc::new(TriageEngine::new(&triage));
        *self.settings.write() = new_settings;

        tracing::info!("configuration reloaded");
        Ok(())
    }

    pub fn get_settings(&self) -> parking_lot::RwLockReadGuard<'_, Settings> {
        self.settings.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_builds_from_defaults() {
        let state = AppState::new(Settings::default(), &TriageConfig::default());
        assert!(state.lead_sink.is_none());
        assert!(state.ticket_sink.is_none());
        assert_eq!(state.history.sender_count(), 0);
    }
}
