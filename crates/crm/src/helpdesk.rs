//! Helpdesk ticket client
//!
//! Thin JSON client for the ticketing system behind the `TicketSink` seam.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use chat_triage_core::{CollaboratorError, TicketReceipt, TicketRequest, TicketSink};
use chat_triage_config::HelpdeskConfig;

pub struct HelpdeskClient {
    config: HelpdeskConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct TicketPayload<'a> {
    subject: &'a str,
    description: &'a str,
    team: &'a str,
    priority: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    requester_email: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TicketResponse {
    id: String,
}

impl HelpdeskClient {
    pub fn new(config: &HelpdeskConfig) -> Result<Self, CollaboratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| CollaboratorError::Request(e.to_string()))?;

        Ok(Self {
            config: config.clone(),
            client,
        })
    }
}

#[async_trait]
impl TicketSink for HelpdeskClient {
    async fn create_ticket(
        &self,
        request: &TicketRequest,
    ) -> Result<TicketReceipt, CollaboratorError> {
        if !self.config.enabled {
            return Err(CollaboratorError::Disabled);
        }

        let payload = TicketPayload {
            subject: &request.subject,
            description: &request.body,
            team: request.team.as_str(),
            priority: request.priority.as_str(),
            requester_email: request.requester_email.as_deref(),
        };

        let response = self
            .client
            .post(format!("{}/tickets", self.config.api_base))
            .bearer_auth(&self.config.api_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| CollaboratorError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::UnexpectedResponse {
                status: status.as_u16(),
                body,
            });
        }

        let ticket: TicketResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::Request(e.to_string()))?;

        tracing::info!(ticket_id = %ticket.id, team = payload.team, "ticket created");
        Ok(TicketReceipt {
            ticket_id: ticket.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_triage_core::{Priority, Team};

    #[test]
    fn test_payload_shape() {
        let request = TicketRequest {
            team: Team::Billing,
            priority: Priority::High,
            subject: "Billing inquiry".to_string(),
            body: "My invoice charge is wrong".to_string(),
            requester_email: None,
        };

        let payload = TicketPayload {
            subject: &request.subject,
            description: &request.body,
            team: request.team.as_str(),
            priority: request.priority.as_str(),
            requester_email: request.requester_email.as_deref(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["team"], "billing");
        assert_eq!(json["priority"], "high");
        assert!(json.get("requester_email").is_none());
    }
}
