//! Profile service implementing the driving ports.
//!
//! Orchestrates the store, the welcome publisher and the webhook probe. The
//! welcome event is published only when `upsert_user` actually created the
//! record; a publish failure is reported to the caller without undoing the
//! insert.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    UpsertOutcome, UserProfileCommand, UserProfileQuery, UserProfileRepository,
    UserProfileRepositoryError, WebhookProbe, WebhookProbeError, WelcomePublisher,
    WelcomePublisherError,
};
use crate::domain::{
    Error, FcmToken, ProfileField, ProfileFieldValue, UserId, UserProfile, WebhookUrl,
};

/// Detail code attached when the profile exists but its welcome event does
/// not.
pub const WELCOME_NOT_PUBLISHED_CODE: &str = "welcome_event_not_published";
/// Detail code for webhooks that fail their liveness probe.
pub const UNREACHABLE_WEBHOOK_CODE: &str = "unreachable_webhook";

/// Profile service over a repository `R`, publisher `P` and webhook probe `W`.
#[derive(Clone)]
pub struct UserProfileService<R, P, W> {
    repository: Arc<R>,
    publisher: Arc<P>,
    probe: Arc<W>,
    clock: Arc<dyn Clock>,
}

impl<R, P, W> UserProfileService<R, P, W> {
    /// Create a new service from its collaborators.
    pub fn new(
        repository: Arc<R>,
        publisher: Arc<P>,
        probe: Arc<W>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            publisher,
            probe,
            clock,
        }
    }
}

fn map_repository_error(error: UserProfileRepositoryError) -> Error {
    match error {
        UserProfileRepositoryError::Connection { message } => {
            Error::internal(format!("profile store unavailable: {message}"))
        }
        UserProfileRepositoryError::Timeout { operation } => {
            Error::internal(format!("profile store timed out during {operation}"))
        }
        UserProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile store error: {message}"))
        }
    }
}

fn map_publish_error(error: &WelcomePublisherError) -> Error {
    Error::internal(format!(
        "profile created but the welcome event could not be published: {error}"
    ))
    .with_details(json!({
        "code": WELCOME_NOT_PUBLISHED_CODE,
        "profileCreated": true,
    }))
}

fn map_probe_error(error: &WebhookProbeError, index: usize) -> Error {
    Error::invalid_request(format!("webhook at index {index} is not reachable"))
        .with_details(json!({
            "field": ProfileField::Webhooks.wire_name(),
            "value": error.url(),
            "index": index,
            "code": UNREACHABLE_WEBHOOK_CODE,
            "reason": error.to_string(),
        }))
}

fn profile_not_found() -> Error {
    Error::not_found("user profile not found")
}

impl<R, P, W> UserProfileService<R, P, W>
where
    W: WebhookProbe,
{
    async fn ensure_reachable(&self, webhooks: &[WebhookUrl]) -> Result<(), Error> {
        for (index, url) in webhooks.iter().enumerate() {
            if let Err(err) = self.probe.probe(url).await {
                debug!(%url, index, error = %err, "webhook failed reachability probe");
                return Err(map_probe_error(&err, index));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<R, P, W> UserProfileCommand for UserProfileService<R, P, W>
where
    R: UserProfileRepository,
    P: WelcomePublisher,
    W: WebhookProbe,
{
    async fn upsert_user(&self, user_id: &UserId) -> Result<UpsertOutcome, Error> {
        let profile = UserProfile::new(user_id.clone(), self.clock.utc());
        let created = self
            .repository
            .insert_if_absent(&profile)
            .await
            .map_err(map_repository_error)?;

        if created {
            if let Err(err) = self.publisher.publish(user_id).await {
                warn!(%user_id, error = %err, "profile created without welcome event");
                return Err(map_publish_error(&err));
            }
            info!(%user_id, "profile created");
        }
        Ok(UpsertOutcome { created })
    }

    async fn edit_field(
        &self,
        user_id: &UserId,
        value: ProfileFieldValue,
    ) -> Result<ProfileFieldValue, Error> {
        if let ProfileFieldValue::Webhooks(webhooks) = &value {
            // Outbound requests are only made on behalf of existing profiles.
            let existing = self
                .repository
                .read_field(user_id, ProfileField::Webhooks)
                .await
                .map_err(map_repository_error)?;
            if existing.is_none() {
                return Err(profile_not_found());
            }
            self.ensure_reachable(webhooks).await?;
        }

        let matched = self
            .repository
            .update_field(user_id, &value, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        if !matched {
            return Err(profile_not_found());
        }
        debug!(%user_id, field = value.field().wire_name(), "profile field updated");
        Ok(value)
    }

    async fn add_fcm_token(&self, user_id: &UserId, token: FcmToken) -> Result<FcmToken, Error> {
        let matched = self
            .repository
            .push_fcm_token(user_id, &token, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        if matched { Ok(token) } else { Err(profile_not_found()) }
    }

    async fn delete_fcm_token(
        &self,
        user_id: &UserId,
        token: FcmToken,
    ) -> Result<FcmToken, Error> {
        let matched = self
            .repository
            .pull_fcm_token(user_id, &token, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        if matched { Ok(token) } else { Err(profile_not_found()) }
    }

    async fn delete_user(&self, user_id: &UserId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(user_id)
            .await
            .map_err(map_repository_error)?;
        debug!(%user_id, removed, "profile delete requested");
        Ok(())
    }
}

#[async_trait]
impl<R, P, W> UserProfileQuery for UserProfileService<R, P, W>
where
    R: UserProfileRepository,
    P: Send + Sync,
    W: Send + Sync,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<UserProfile, Error> {
        self.repository
            .find_by_user_id(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(profile_not_found)
    }

    async fn fetch_field(
        &self,
        user_id: &UserId,
        field: ProfileField,
    ) -> Result<ProfileFieldValue, Error> {
        self.repository
            .read_field(user_id, field)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(profile_not_found)
    }
}

#[cfg(test)]
mod tests;
