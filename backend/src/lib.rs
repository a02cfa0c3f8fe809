//! User profile service library.
//!
//! Stores per-user notification preferences behind authenticated REST
//! endpoints and publishes a one-time welcome event when a profile is first
//! created. Layout follows ports and adapters: [`domain`] holds the rules,
//! [`inbound`] and [`outbound`] hold the framework and infrastructure edges.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
