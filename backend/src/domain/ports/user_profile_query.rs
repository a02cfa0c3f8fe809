//! Driving port for profile reads.

use async_trait::async_trait;

use crate::domain::{Error, ProfileField, ProfileFieldValue, UserId, UserProfile};

/// Reads available to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Full profile of the caller.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the caller has no profile.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<UserProfile, Error>;

    /// Single-field projection.
    async fn fetch_field(
        &self,
        user_id: &UserId,
        field: ProfileField,
    ) -> Result<ProfileFieldValue, Error>;
}
