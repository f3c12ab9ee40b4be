//! Lead creation service
//!
//! Search-then-update-else-create against Zoho, with bounded retries and
//! exponential backoff on creation, then a follow-up task due inside the
//! lead's contact window.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use chat_triage_core::{
    CollaboratorError, LeadReceipt, LeadSink, LeadSubmission, Qualification,
};
use chat_triage_config::CrmConfig;

use crate::zoho::{ZohoCrmClient, ZohoLeadRecord, ZohoTaskRecord};

pub struct LeadService {
    client: ZohoCrmClient,
    config: CrmConfig,
}

impl LeadService {
    pub fn new(config: &CrmConfig) -> Result<Self, CollaboratorError> {
        Ok(Self {
            client: ZohoCrmClient::new(config)?,
            config: config.clone(),
        })
    }

    fn build_record(submission: &LeadSubmission) -> ZohoLeadRecord {
        let visitor = &submission.visitor;

        // Zoho requires Last_Name; split the declared name, fall back to a
        // placeholder for anonymous visitors
        let (first_name, last_name) = match visitor.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => match name.rsplit_once(' ') {
                Some((first, last)) => (first.to_string(), last.to_string()),
                None => (String::new(), name.to_string()),
            },
            _ => (String::new(), "Website Visitor".to_string()),
        };

        let description = format!(
            "Requirement: {}\nMessage: {}\nScore: {}/100 ({})\nContact within: {} hours",
            visitor.requirement.as_deref().unwrap_or("Not specified"),
            submission.message_text,
            submission.score.total,
            submission.score.qualification.as_str(),
            submission.score.contact_window.hours(),
        );

        ZohoLeadRecord {
            first_name,
            last_name,
            email: visitor.email.clone().unwrap_or_default(),
            phone: visitor.phone.clone().unwrap_or_default(),
            company: visitor.business_type.clone().unwrap_or_default(),
            lead_source: "Website Chat".to_string(),
            description,
            lead_score: submission.score.total,
            business_type: visitor.business_type.clone().unwrap_or_default(),
        }
    }

    /// Create the lead with bounded retries and exponential backoff
    async fn create_with_retry(
        &self,
        record: &ZohoLeadRecord,
    ) -> Result<String, CollaboratorError> {
        let mut last_err = CollaboratorError::Request("no attempts made".to_string());

        for attempt in 0..self.config.max_retries {
            match self.client.create_lead(record).await {
                Ok(id) => return Ok(id),
                Err(e) => {
                    tracing::warn!(attempt = attempt + 1, error = %e, "lead creation failed");
                    last_err = e;
                    if attempt + 1 < self.config.max_retries {
                        let delay = self.config.retry_base_delay_ms * (1 << attempt);
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                    }
                }
            }
        }

        Err(last_err)
    }

    async fn schedule_follow_up(&self, lead_id: &str, submission: &LeadSubmission) {
        let due = Utc::now() + chrono::Duration::hours(submission.score.contact_window.hours());
        let priority = match submission.score.qualification {
            Qualification::Hot => "High",
            Qualification::Warm => "Medium",
            Qualification::Cold => "Low",
        };

        let task = ZohoTaskRecord {
            subject: "Follow up with lead".to_string(),
            description: "Reach out to prospect regarding their requirements".to_string(),
            due_date: due.format("%Y-%m-%d").to_string(),
            priority: priority.to_string(),
            who_id: lead_id.to_string(),
        };

        // A lost follow-up task is not worth failing the lead push over
        if let Err(e) = self.client.create_task(&task).await {
            tracing::warn!(lead_id = %lead_id, error = %e, "follow-up task creation failed");
        }
    }
}

#[async_trait]
impl LeadSink for LeadService {
    async fn create_or_update_lead(
        &self,
        submission: &LeadSubmission,
    ) -> Result<LeadReceipt, CollaboratorError> {
        if !self.config.enabled {
            return Err(CollaboratorError::Disabled);
        }

        let record = Self::build_record(submission);

        // Dedupe by email when the visitor left one; a failed search is
        // non-fatal and falls through to creation
        if !record.email.is_empty() {
            match self.client.search_leads_by_email(&record.email).await {
                Ok(existing) if !existing.is_empty() => {
                    let lead_id = existing[0].clone();
                    self.client.update_lead(&lead_id, &record).await?;
                    self.schedule_follow_up(&lead_id, submission).await;
                    return Ok(LeadReceipt {
                        lead_id,
                        updated_existing: true,
                    });
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "lead search failed, creating fresh");
                }
            }
        }

        let lead_id = self.create_with_retry(&record).await?;
        self.schedule_follow_up(&lead_id, submission).await;

        Ok(LeadReceipt {
            lead_id,
            updated_existing: false,
        })
    }
}
