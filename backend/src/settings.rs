//! Process configuration loaded via OrthoConfig.
//!
//! Values come from `PROFILE_API_*` environment variables, an optional
//! configuration file and CLI flags. Every knob is optional; accessors apply
//! defaults so the rest of the crate never sees an unset value.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::identity::JwtVerifierConfig;
use crate::outbound::persistence::PoolConfig;
use crate::outbound::queue::WelcomeQueueConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_WELCOME_QUEUE: &str = "welcome_queue";
const DEFAULT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Configuration for the profile service binary.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PROFILE_API")]
pub struct ProfileServiceSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string for profiles.
    pub database_url: Option<String>,
    /// AMQP broker URI receiving welcome events.
    pub amqp_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Deadline for each profile store operation, in seconds.
    pub store_timeout_secs: Option<u64>,
    /// Deadline for declaring the queue and publishing, in seconds.
    pub publish_timeout_secs: Option<u64>,
    /// Deadline for each webhook probe, in seconds.
    pub probe_timeout_secs: Option<u64>,
    /// Durable queue receiving welcome events.
    pub welcome_queue: Option<String>,
    /// HS256 secret for bearer credentials.
    pub jwt_secret: Option<String>,
    /// Required `iss` claim.
    pub jwt_issuer: Option<String>,
    /// Required `aud` claim.
    pub jwt_audience: Option<String>,
}

impl std::fmt::Debug for ProfileServiceSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileServiceSettings")
            .field("bind_addr", &self.bind_addr)
            .field("pool_max_size", &self.pool_max_size)
            .field("store_timeout_secs", &self.store_timeout_secs)
            .field("publish_timeout_secs", &self.publish_timeout_secs)
            .field("probe_timeout_secs", &self.probe_timeout_secs)
            .field("welcome_queue", &self.welcome_queue)
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .finish_non_exhaustive()
    }
}

/// A setting the server cannot start without is absent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required setting: {0}")]
pub struct MissingSetting(pub &'static str);

fn seconds(value: Option<u64>) -> Duration {
    Duration::from_secs(value.unwrap_or(DEFAULT_TIMEOUT_SECS))
}

impl ProfileServiceSettings {
    /// Parsed bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    /// Store operation deadline.
    pub fn store_timeout(&self) -> Duration {
        seconds(self.store_timeout_secs)
    }

    /// Webhook probe deadline.
    pub fn probe_timeout(&self) -> Duration {
        seconds(self.probe_timeout_secs)
    }

    /// Pool configuration; requires `database_url`.
    pub fn pool_config(&self) -> Result<PoolConfig, MissingSetting> {
        let url = self
            .database_url
            .as_deref()
            .ok_or(MissingSetting("database_url"))?;
        Ok(PoolConfig::new(url).with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)))
    }

    /// Broker URI; requires `amqp_url`.
    pub fn amqp_url(&self) -> Result<&str, MissingSetting> {
        self.amqp_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(MissingSetting("amqp_url"))
    }

    /// Welcome queue name and publish deadline.
    pub fn welcome_queue(&self) -> WelcomeQueueConfig {
        WelcomeQueueConfig {
            queue_name: self
                .welcome_queue
                .clone()
                .unwrap_or_else(|| DEFAULT_WELCOME_QUEUE.to_owned()),
            publish_timeout: seconds(self.publish_timeout_secs),
        }
    }

    /// Bearer verification settings; requires a non-empty `jwt_secret`.
    pub fn jwt(&self) -> Result<JwtVerifierConfig, MissingSetting> {
        let secret = self
            .jwt_secret
            .clone()
            .filter(|secret| !secret.is_empty())
            .ok_or(MissingSetting("jwt_secret"))?;
        Ok(JwtVerifierConfig {
            secret,
            issuer: self.jwt_issuer.clone(),
            audience: self.jwt_audience.clone(),
        })
    }
}
