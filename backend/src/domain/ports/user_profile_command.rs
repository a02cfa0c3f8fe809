//! Driving port for profile mutations.

use async_trait::async_trait;

use crate::domain::{Error, FcmToken, ProfileFieldValue, UserId};

/// Result of [`UserProfileCommand::upsert_user`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// Whether this call created the profile.
    pub created: bool,
}

/// Mutations available to inbound adapters.
///
/// The acting identity is always the authenticated caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileCommand: Send + Sync {
    /// Create the caller's profile if absent, emitting one welcome event on
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns `internal_error` when the store or queue fails. A failed
    /// publish after a successful insert carries
    /// `details.profileCreated = true`; the profile is kept.
    async fn upsert_user(&self, user_id: &UserId) -> Result<UpsertOutcome, Error>;

    /// Replace one field, returning the stored value.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the caller has no profile, checked before
    /// any webhook is contacted, and `invalid_request` when a webhook fails
    /// its reachability probe.
    async fn edit_field(
        &self,
        user_id: &UserId,
        value: ProfileFieldValue,
    ) -> Result<ProfileFieldValue, Error>;

    /// Append a push token.
    async fn add_fcm_token(&self, user_id: &UserId, token: FcmToken) -> Result<FcmToken, Error>;

    /// Remove every occurrence of a push token.
    async fn delete_fcm_token(
        &self,
        user_id: &UserId,
        token: FcmToken,
    ) -> Result<FcmToken, Error>;

    /// Remove the caller's profile. Succeeds when none exists.
    async fn delete_user(&self, user_id: &UserId) -> Result<(), Error>;
}
