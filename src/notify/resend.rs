//! Mail delivery through the Resend HTTP API.

use super::{EmailMessage, Mailer};
use crate::{
    config::NotificationConfig,
    errors::{Error, Result},
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

/// POSTs messages to the configured endpoint with the API key as bearer token
#[derive(Debug, Clone)]
pub struct ResendMailer {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ResendMailer {
    #[allow(missing_docs)]
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// `None` when notifications are not enabled.
    #[must_use]
    pub fn from_config(config: &NotificationConfig) -> Option<Self> {
        if !config.is_enabled() {
            return None;
        }
        config
            .api_key
            .as_deref()
            .map(|key| Self::new(&config.endpoint, key))
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    #[instrument(skip(self, message), fields(subject = %message.subject))]
    async fn send(&self, message: &EmailMessage) -> Result<String> {
        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Remote {
                status: status.as_u16(),
                message: format!("Email API error: {body}"),
            });
        }

        let sent: SendResponse = resp.json().await?;
        Ok(sent.id)
    }
}
