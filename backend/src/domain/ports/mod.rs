//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`UserProfileCommand`], [`UserProfileQuery`]) are called by
//! inbound adapters. Driven ports ([`UserProfileRepository`],
//! [`WelcomePublisher`], [`WebhookProbe`], [`IdentityVerifier`]) are
//! implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod identity_verifier;
mod user_profile_command;
mod user_profile_query;
mod user_profile_repository;
mod webhook_probe;
mod welcome_publisher;

#[cfg(test)]
pub use identity_verifier::MockIdentityVerifier;
pub use identity_verifier::{IdentityVerificationError, IdentityVerifier};
#[cfg(test)]
pub use user_profile_command::MockUserProfileCommand;
pub use user_profile_command::{UpsertOutcome, UserProfileCommand};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_profile_repository::MockUserProfileRepository;
pub use user_profile_repository::{UserProfileRepository, UserProfileRepositoryError};
#[cfg(test)]
pub use webhook_probe::MockWebhookProbe;
pub use webhook_probe::{WebhookProbe, WebhookProbeError};
#[cfg(test)]
pub use welcome_publisher::MockWelcomePublisher;
pub use welcome_publisher::{WelcomePublisher, WelcomePublisherError};
