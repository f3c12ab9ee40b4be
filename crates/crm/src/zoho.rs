//! Zoho CRM API v2 client
//!
//! OAuth refresh-token flow with a cached access token, plus the Leads and
//! Tasks endpoints the lead service needs. All payloads are typed; Zoho's
//! `{"data": [record]}` envelope is modeled once.

use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use chat_triage_core::CollaboratorError;
use chat_triage_config::CrmConfig;

/// Zoho access tokens last 3600 s; refresh five minutes early
const TOKEN_LIFETIME_SECS: i64 = 3600;
const TOKEN_REFRESH_MARGIN_SECS: i64 = 300;

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Client for Zoho CRM API v2
pub struct ZohoCrmClient {
    config: CrmConfig,
    client: Client,
    token: Mutex<Option<CachedToken>>,
}

/// Zoho request/response envelope
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
}

/// A lead record as Zoho expects it
#[derive(Debug, Clone, Serialize)]
pub struct ZohoLeadRecord {
    #[serde(rename = "First_Name")]
    pub first_name: String,
    #[serde(rename = "Last_Name")]
    pub last_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Lead_Source")]
    pub lead_source: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Lead_Score__c")]
    pub lead_score: u32,
    #[serde(rename = "Business_Type__c")]
    pub business_type: String,
}

#[derive(Debug, Serialize)]
struct ZohoLeadUpdate<'a> {
    id: &'a str,
    #[serde(flatten)]
    record: &'a ZohoLeadRecord,
}

/// A follow-up task record
#[derive(Debug, Clone, Serialize)]
pub struct ZohoTaskRecord {
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Description")]
    pub description: String,
    /// YYYY-MM-DD
    #[serde(rename = "Due_Date")]
    pub due_date: String,
    #[serde(rename = "Priority")]
    pub priority: String,
    #[serde(rename = "Who_Id")]
    pub who_id: String,
}

#[derive(Debug, Deserialize)]
struct CreatedRecord {
    details: CreatedDetails,
}

#[derive(Debug, Deserialize)]
struct CreatedDetails {
    id: String,
}

#[derive(Debug, Deserialize)]
struct FoundLead {
    id: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl ZohoCrmClient {
    pub fn new(config: &CrmConfig) -> Result<Self, CollaboratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| CollaboratorError::Request(e.to_string()))?;

        Ok(Self {
            config: config.clone(),
            client,
            token: Mutex::new(None),
        })
    }

    /// Get the cached access token, refreshing through the OAuth endpoint
    /// when missing or near expiry.
    async fn access_token(&self) -> Result<String, CollaboratorError> {
        {
            let cached = self.token.lock();
            if let Some(t) = cached.as_ref() {
                if t.expires_at > Utc::now() {
                    return Ok(t.token.clone());
                }
            }
        }

        let response = self
            .client
            .post(format!("{}/oauth/v2/token", self.config.accounts_base))
            .form(&[
                ("refresh_token", self.config.refresh_token.as_str()),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| CollaboratorError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Auth(format!(
                "token refresh failed ({}): {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::Auth(e.to_string()))?;

        let expires_at = Utc::now()
            + chrono::Duration::seconds(TOKEN_LIFETIME_SECS - TOKEN_REFRESH_MARGIN_SECS);
        *self.token.lock() = Some(CachedToken {
            token: token.access_token.clone(),
            expires_at,
        });

        Ok(token.access_token)
    }

    /// Create a lead, returning the new record id
    pub async fn create_lead(&self, record: &ZohoLeadRecord) -> Result<String, CollaboratorError> {
        let token = self.access_token().await?;

        let response = self
            .client
            .post(format!("{}/Leads", self.config.api_base))
            .bearer_auth(&token)
            .json(&Envelope {
                data: vec![record.clone()],
            })
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

        let created: Envelope<CreatedRecord> = response
            .json()
            .await
            .map_err(|e| CollaboratorError::Request(e.to_string()))?;

        let id = created
            .data
            .into_iter()
            .next()
            .map(|r| r.details.id)
            .ok_or_else(|| CollaboratorError::Request("empty create response".to_string()))?;

        tracing::info!(lead_id = %id, "lead created");
        Ok(id)
    }

    /// Search leads by exact email; an error here is non-fatal for the
    /// caller (it falls back to creating a fresh lead)
    pub async fn search_leads_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<String>, CollaboratorError> {
        let token = self.access_token().await?;
        let criteria = format!("(Email:equals:{})", email);

        let response = self
            .client
            .get(format!("{}/Leads/search", self.config.api_base))
            .bearer_auth(&token)
            .query(&[("criteria", criteria.as_str())])
            .send()
            .await
            .map_err(|e| CollaboratorError::Request(e.to_string()))?;

        // Zoho answers 204 when nothing matched
        if response.status().as_u16() == 204 {
            return Ok(Vec::new());
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::UnexpectedResponse {
                status: status.as_u16(),
                body,
            });
        }

        let found: Envelope<FoundLead> = response
            .json()
            .await
            .map_err(|e| CollaboratorError::Request(e.to_string()))?;

        Ok(found.data.into_iter().map(|l| l.id).collect())
    }

    /// Update an existing lead in place
    pub async fn update_lead(
        &self,
        lead_id: &str,
        record: &ZohoLeadRecord,
    ) -> Result<(), CollaboratorError> {
        let token = self.access_token().await?;

        let response = self
            .client
            .put(format!("{}/Leads", self.config.api_base))
            .bearer_auth(&token)
            .json(&Envelope {
                data: vec![ZohoLeadUpdate {
                    id: lead_id,
                    record,
                }],
            })
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

        tracing::info!(lead_id = %lead_id, "lead updated");
        Ok(())
    }

    /// Create a follow-up task attached to a lead
    pub async fn create_task(&self, record: &ZohoTaskRecord) -> Result<String, CollaboratorError> {
        let token = self.access_token().await?;

        let response = self
            .client
            .post(format!("{}/Tasks", self.config.api_base))
            .bearer_auth(&token)
            .json(&Envelope {
                data: vec![record.clone()],
            })
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

        let created: Envelope<CreatedRecord> = response
            .json()
            .await
            .map_err(|e| CollaboratorError::Request(e.to_string()))?;

        let id = created
            .data
            .into_iter()
            .next()
            .map(|r| r.details.id)
            .ok_or_else(|| CollaboratorError::Request("empty create response".to_string()))?;

        tracing::info!(task_id = %id, who_id = %record.who_id, "follow-up task created");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_record_uses_zoho_field_names() {
        let record = ZohoLeadRecord {
            first_name: "Prithivi".to_string(),
            last_name: "Raj".to_string(),
            email: "prithivi@example.com".to_string(),
            phone: "+91-9876543210".to_string(),
            company: "Tech Store".to_string(),
            lead_source: "Website Chat".to_string(),
            description: "Interested in WhatsApp bot".to_string(),
            lead_score: 78,
            business_type: "E-commerce".to_string(),
        };

        let json = serde_json::to_value(Envelope {
            data: vec![record],
        })
        .unwrap();
        let lead = &json["data"][0];
        assert_eq!(lead["Lead_Score__c"], 78);
        assert_eq!(lead["Business_Type__c"], "E-commerce");
        assert_eq!(lead["Lead_Source"], "Website Chat");
        assert_eq!(lead["First_Name"], "Prithivi");
    }

    #[test]
    fn test_update_payload_flattens_record_with_id() {
        let record = ZohoLeadRecord {
            first_name: String::new(),
            last_name: "Visitor".to_string(),
            email: "v@example.com".to_string(),
            phone: String::new(),
            company: String::new(),
            lead_source: "Website Chat".to_string(),
            description: String::new(),
            lead_score: 50,
            business_type: String::new(),
        };

        let json = serde_json::to_value(Envelope {
            data: vec![ZohoLeadUpdate {
                id: "1234",
                record: &record,
            }],
        })
        .unwrap();
        assert_eq!(json["data"][0]["id"], "1234");
        assert_eq!(json["data"][0]["Lead_Score__c"], 50);
    }
}
