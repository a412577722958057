//! Mail Relay Client
//!
//! Thin HTTP client for the outbound mail relay. Notification mail is sent
//! fire-and-forget: a relay outage must not fail registration or invites.

use serde_json::json;

use crate::config::MailConfig;
use crate::error::{Result, ServiceError};

#[derive(Clone)]
pub struct MailClient {
    http: reqwest::Client,
    config: MailConfig,
}

impl MailClient {
    pub fn new(http: reqwest::Client, config: MailConfig) -> Self {
        Self { http, config }
    }

    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let response = self
            .http
            .post(&self.config.relay_url)
            .json(&json!({
                "from": self.config.sender,
                "to": to,
                "subject": subject,
                "body": body,
            }))
            .send()
            .await
            .map_err(|e| ServiceError::Upstream {
                message: format!("mail relay unreachable: {e}"),
            })?;
        if !response.status().is_success() {
            return Err(ServiceError::Upstream {
                message: format!("mail relay returned {}", response.status()),
            });
        }
        Ok(())
    }

    /// Spawned send; failures are logged, never surfaced to the caller.
    pub fn send_in_background(&self, to: String, subject: String, body: String) {
        let client = self.clone();
        tokio::spawn(async move {
            if let Err(e) = client.send(&to, &subject, &body).await {
                tracing::warn!(to = %to, error = %e, "notification mail failed");
            }
        });
    }
}
