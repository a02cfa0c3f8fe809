//! Builds the adapter graph behind [`HttpState`].

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use user_profile_api::domain::UserProfileService;
use user_profile_api::inbound::http::state::HttpState;
use user_profile_api::outbound::identity::JwtIdentityVerifier;
use user_profile_api::outbound::persistence::DieselUserProfileRepository;
use user_profile_api::outbound::queue::AmqpWelcomePublisher;
use user_profile_api::outbound::webhook::HttpWebhookProbe;

use super::ServerConfig;

/// Wire repository, publisher, probe and verifier into the handler state.
///
/// # Errors
/// Fails when the webhook HTTP client cannot be constructed.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let repository = Arc::new(DieselUserProfileRepository::new(
        config.db_pool.clone(),
        config.store_timeout,
    ));
    let publisher = Arc::new(AmqpWelcomePublisher::new(
        config.amqp_url.as_str(),
        config.welcome_queue.clone(),
    ));
    let probe = Arc::new(
        HttpWebhookProbe::new(config.probe_timeout)
            .map_err(|err| std::io::Error::other(format!("webhook probe client: {err}")))?,
    );
    let service = Arc::new(UserProfileService::new(repository, publisher, probe, clock));

    Ok(HttpState::new(
        service.clone(),
        service,
        Arc::new(JwtIdentityVerifier::new(&config.jwt)),
    ))
}
