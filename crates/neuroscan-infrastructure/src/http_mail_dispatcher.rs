//! HTTP mail dispatcher.
//!
//! Delivers messages through a transactional-mail REST API: one JSON POST
//! per message, optional bearer key, hard request timeout. Failures are
//! reported to the caller and never retried here.

use async_trait::async_trait;
use neuroscan_core::mail::{MailDispatcher, MailError, MailMessage};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

pub struct HttpMailDispatcher {
    client: Client,
    endpoint: String,
    sender: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct OutboundMail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

impl HttpMailDispatcher {
    /// Creates a dispatcher for a mail API endpoint.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Full URL of the send endpoint
    /// * `sender` - From-address placed on every message
    /// * `api_key` - Optional bearer credential for the mail API
    /// * `timeout` - Hard bound on each send call
    pub fn new(
        endpoint: impl Into<String>,
        sender: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, MailError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MailError(format!("failed to build mail client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            sender: sender.into(),
            api_key,
        })
    }
}

#[async_trait]
impl MailDispatcher for HttpMailDispatcher {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let body = OutboundMail {
            from: &self.sender,
            to: &message.to,
            subject: &message.subject,
            html: &message.html_body,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MailError(format!("mail API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read mail API error body".to_string());
            return Err(MailError(format!("mail API returned {}: {}", status, detail)));
        }

        debug!(to = %message.to, subject = %message.subject, "mail dispatched");
        Ok(())
    }
}
