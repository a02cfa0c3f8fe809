//! HTTP server configuration assembled from [`ProfileServiceSettings`].

use std::net::SocketAddr;
use std::time::Duration;

use user_profile_api::outbound::identity::JwtVerifierConfig;
use user_profile_api::outbound::persistence::DbPool;
use user_profile_api::outbound::queue::WelcomeQueueConfig;
use user_profile_api::settings::ProfileServiceSettings;

/// Everything the server needs to build its adapters.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) store_timeout: Duration,
    pub(crate) probe_timeout: Duration,
    pub(crate) amqp_url: String,
    pub(crate) welcome_queue: WelcomeQueueConfig,
    pub(crate) jwt: JwtVerifierConfig,
}

impl ServerConfig {
    /// Validate settings and open the connection pool.
    ///
    /// # Errors
    /// Fails when a required setting is missing or malformed, or when the
    /// pool cannot be built.
    pub async fn from_settings(settings: &ProfileServiceSettings) -> std::io::Result<Self> {
        let bind_addr = settings
            .bind_addr()
            .map_err(|err| std::io::Error::other(format!("invalid bind_addr: {err}")))?;
        let jwt = settings.jwt().map_err(std::io::Error::other)?;
        let amqp_url = settings.amqp_url().map_err(std::io::Error::other)?.to_owned();
        let pool_config = settings.pool_config().map_err(std::io::Error::other)?;
        let db_pool = DbPool::new(pool_config)
            .await
            .map_err(|err| std::io::Error::other(format!("database pool: {}", err.message())))?;

        Ok(Self {
            bind_addr,
            db_pool,
            store_timeout: settings.store_timeout(),
            probe_timeout: settings.probe_timeout(),
            amqp_url,
            welcome_queue: settings.welcome_queue(),
            jwt,
        })
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
