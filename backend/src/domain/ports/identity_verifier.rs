//! Port resolving bearer credentials to user identities.

use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Reasons a credential was not accepted.
    pub enum IdentityVerificationError {
        /// The credential failed verification.
        Rejected { message: String } =>
            "credential rejected: {message}",
        /// The credential verified but carries no usable identity.
        MissingSubject =>
            "credential carries no subject",
    }
}

/// Resolves an opaque bearer credential to a verified [`UserId`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify `credential` and return the identity it asserts.
    async fn verify(&self, credential: &str) -> Result<UserId, IdentityVerificationError>;
}
