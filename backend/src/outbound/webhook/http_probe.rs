//! Reqwest-backed webhook liveness probe.
//!
//! Sends one `POST` with an empty JSON object and accepts only `200 OK`.
//! The client carries its own timeout, separate from store deadlines.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::domain::WebhookUrl;
use crate::domain::ports::{WebhookProbe, WebhookProbeError};

/// User agent announced to webhook receivers.
pub const WEBHOOK_PROBE_USER_AGENT: &str = "user-profile-api-webhook-probe/0.1";

/// Probes webhooks over HTTP(S).
#[derive(Clone)]
pub struct HttpWebhookProbe {
    client: Client,
}

impl HttpWebhookProbe {
    /// Build a probe whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(WEBHOOK_PROBE_USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

fn map_transport_error(url: &WebhookUrl, error: &reqwest::Error) -> WebhookProbeError {
    if error.is_timeout() {
        WebhookProbeError::timeout(url.as_str())
    } else {
        WebhookProbeError::unreachable(url.as_str(), error.to_string())
    }
}

#[async_trait]
impl WebhookProbe for HttpWebhookProbe {
    async fn probe(&self, url: &WebhookUrl) -> Result<(), WebhookProbeError> {
        let response = self
            .client
            .post(url.as_str())
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|err| map_transport_error(url, &err))?;

        let status = response.status();
        debug!(%url, %status, "webhook probe answered");
        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(WebhookProbeError::unexpected_status(url.as_str(), status.as_u16()))
        }
    }
}
