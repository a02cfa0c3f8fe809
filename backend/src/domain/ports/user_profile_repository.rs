//! Port for profile persistence.
//!
//! Every mutation is a partial update keyed by [`UserId`]: it sets only the
//! columns it names plus `updated_at`, so concurrent edits of different
//! fields never clobber each other. Adapters bound every call with a timeout
//! and report failures through [`UserProfileRepositoryError`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{FcmToken, ProfileField, ProfileFieldValue, UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum UserProfileRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "profile repository connection failed: {message}",
        /// The store rejected or failed a statement.
        Query { message: String } =>
            "profile repository query failed: {message}",
        /// The operation exceeded its deadline.
        Timeout { operation: String } =>
            "profile repository {operation} timed out",
    }
}

/// Persistence contract for [`UserProfile`] records.
///
/// Methods returning `bool` report whether a record matched; `false` means
/// no profile exists for the user and nothing was written.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Insert `profile` unless one already exists for its user.
    ///
    /// Returns `true` when a new record was created. An existing record is
    /// left untouched.
    async fn insert_if_absent(
        &self,
        profile: &UserProfile,
    ) -> Result<bool, UserProfileRepositoryError>;

    /// Load the full profile.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError>;

    /// Overwrite one field and `updated_at`.
    async fn update_field(
        &self,
        user_id: &UserId,
        value: &ProfileFieldValue,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, UserProfileRepositoryError>;

    /// Read one field by projection.
    async fn read_field(
        &self,
        user_id: &UserId,
        field: ProfileField,
    ) -> Result<Option<ProfileFieldValue>, UserProfileRepositoryError>;

    /// Append a push token, keeping duplicates.
    async fn push_fcm_token(
        &self,
        user_id: &UserId,
        token: &FcmToken,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, UserProfileRepositoryError>;

    /// Remove every occurrence of a push token.
    ///
    /// Matching a profile that lacks the token still counts as a match.
    async fn pull_fcm_token(
        &self,
        user_id: &UserId,
        token: &FcmToken,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, UserProfileRepositoryError>;

    /// Remove the profile. Returns `true` if a record was deleted.
    async fn delete(&self, user_id: &UserId) -> Result<bool, UserProfileRepositoryError>;
}
