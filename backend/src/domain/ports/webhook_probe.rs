//! Port for webhook reachability checks.
//!
//! Syntactic URL rules live on [`WebhookUrl`]; this port covers the network
//! step, which has its own timeout and error kind.

use async_trait::async_trait;

use crate::domain::WebhookUrl;

use super::define_port_error;

define_port_error! {
    /// Reasons a webhook failed its liveness probe.
    pub enum WebhookProbeError {
        /// The request could not be delivered.
        Unreachable { url: String, message: String } =>
            "webhook {url} is unreachable: {message}",
        /// The endpoint answered with something other than 200.
        UnexpectedStatus { url: String, status: u16 } =>
            "webhook {url} answered {status}, expected 200",
        /// The endpoint did not answer in time.
        Timeout { url: String } =>
            "webhook {url} did not answer in time",
    }
}

impl WebhookProbeError {
    /// URL that failed the probe.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Unreachable { url, .. }
            | Self::UnexpectedStatus { url, .. }
            | Self::Timeout { url } => url,
        }
    }
}

/// Liveness check for a single webhook.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebhookProbe: Send + Sync {
    /// Succeeds when `url` answers the probe with 200 OK.
    async fn probe(&self, url: &WebhookUrl) -> Result<(), WebhookProbeError>;
}
