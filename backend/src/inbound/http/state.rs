//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving ports,
//! so they stay testable with mocks and in-memory adapters.

use std::sync::Arc;

use crate::domain::ports::{IdentityVerifier, UserProfileCommand, UserProfileQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Profile mutations.
    pub profiles: Arc<dyn UserProfileCommand>,
    /// Profile reads.
    pub profiles_query: Arc<dyn UserProfileQuery>,
    /// Bearer credential verification for [`super::identity::AuthenticatedUser`].
    pub identity: Arc<dyn IdentityVerifier>,
}

impl HttpState {
    /// Bundle the ports.
    pub fn new(
        profiles: Arc<dyn UserProfileCommand>,
        profiles_query: Arc<dyn UserProfileQuery>,
        identity: Arc<dyn IdentityVerifier>,
    ) -> Self {
        Self {
            profiles,
            profiles_query,
            identity,
        }
    }
}
