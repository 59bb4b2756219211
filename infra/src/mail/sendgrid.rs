//! SendGrid Mail Service Implementation
//!
//! Sends reset-password emails through the SendGrid v3 HTTP API.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, info};

use th_core::errors::{DomainError, DomainResult};
use th_core::services::MailService;
use th_shared::EmailConfig;

use super::{mask_email, reset_password_body, RESET_PASSWORD_SUBJECT};
use crate::InfrastructureError;

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// SendGrid mail service implementation
pub struct SendGridMailService {
    client: reqwest::Client,
    api_key: String,
    from_address: String,
}

impl SendGridMailService {
    /// Create a new SendGrid mail service from the shared email config
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "SendGrid API key is not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(InfrastructureError::Http)?;

        info!(
            "SendGrid mail service initialized with from address: {}",
            mask_email(&config.from_address)
        );

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
        })
    }

    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), InfrastructureError> {
        let payload = json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": { "email": self.from_address },
            "subject": subject,
            "content": [{ "type": "text/plain", "value": body }],
        });

        let response = self
            .client
            .post(SENDGRID_SEND_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(InfrastructureError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(
                recipient = %mask_email(to),
                status = %status,
                "SendGrid rejected the mail request"
            );
            return Err(InfrastructureError::Mail(format!(
                "SendGrid returned {}: {}",
                status, detail
            )));
        }

        debug!(recipient = %mask_email(to), "Mail accepted by SendGrid");
        Ok(())
    }
}

#[async_trait]
impl MailService for SendGridMailService {
    async fn send_reset_password_email(
        &self,
        to: &str,
        raw_token: &str,
        base_url: &str,
    ) -> DomainResult<()> {
        let body = reset_password_body(raw_token, base_url);
        self.send(to, RESET_PASSWORD_SUBJECT, &body)
            .await
            .map_err(DomainError::from)
    }
}
