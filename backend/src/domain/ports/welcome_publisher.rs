//! Port for the one-time "user created" event.

use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised while publishing welcome events.
    pub enum WelcomePublisherError {
        /// The broker or its channel could not be reached.
        Unavailable { message: String } =>
            "welcome queue unavailable: {message}",
        /// The broker refused the declaration or the message.
        Rejected { message: String } =>
            "welcome event rejected: {message}",
        /// Publishing exceeded its deadline.
        Timeout { seconds: u64 } =>
            "welcome event publish timed out after {seconds}s",
    }
}

/// Fire-and-forget emitter of welcome events.
///
/// One call is one publish attempt: no retry, no deduplication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WelcomePublisher: Send + Sync {
    /// Enqueue a welcome event whose body is the user id.
    async fn publish(&self, user_id: &UserId) -> Result<(), WelcomePublisherError>;
}
