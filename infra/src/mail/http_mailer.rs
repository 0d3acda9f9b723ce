//! HTTP Mail Provider Implementation
//!
//! Delivers mail through a transactional provider's JSON API
//! (Resend/Postmark-style: a single POST with from/to/subject/text and a
//! bearer key, answered with a message id).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, info};

use rr_shared::config::MailConfig;
use rr_shared::utils::mask_email;

use crate::mail::mailer::Mailer;
use crate::InfraError;

/// Response body returned by the provider on success
#[derive(Debug, Deserialize)]
struct SendMailResponse {
    id: String,
}

/// Mail service backed by an HTTP provider API
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl HttpMailer {
    /// Create a new HTTP mailer
    pub fn new(config: MailConfig) -> Result<Self, InfraError> {
        if config.api_url.is_empty() {
            return Err(InfraError::Config("MAIL_API_URL not set".to_string()));
        }
        if config.api_key.is_empty() {
            return Err(InfraError::Config("MAIL_API_KEY not set".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(InfraError::Http)?;

        info!(
            from = %mask_email(&config.from_address),
            "HTTP mail provider initialized"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfraError> {
        Self::new(MailConfig::from_env())
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send_mail(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfraError> {
        debug!(to = %mask_email(to), "Sending mail via HTTP provider");

        let payload = json!({
            "from": format!("{} <{}>", self.config.from_name, self.config.from_address),
            "to": [to],
            "subject": subject,
            "text": body,
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(to = %mask_email(to), error = %e, "Mail provider request failed");
                InfraError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(
                to = %mask_email(to),
                status = %status,
                detail = %detail,
                "Mail provider rejected message"
            );
            return Err(InfraError::Mail(format!(
                "Provider returned {}: {}",
                status, detail
            )));
        }

        let body: SendMailResponse = response.json().await.map_err(|e| {
            error!(to = %mask_email(to), error = %e, "Malformed mail provider response");
            InfraError::Http(e)
        })?;

        info!(
            to = %mask_email(to),
            message_id = %body.id,
            provider = "http",
            "Mail accepted by provider"
        );

        Ok(body.id)
    }

    fn provider_name(&self) -> &str {
        "Http"
    }
}
