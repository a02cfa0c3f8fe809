//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL profile repository (Diesel, `bb8` pool).
//! - **queue**: AMQP publisher for welcome events.
//! - **webhook**: reqwest liveness probe for webhook URLs.
//! - **identity**: HS256 JWT verification.
//!
//! Adapters translate between infrastructure types and the domain; they
//! hold no business rules.

pub mod identity;
pub mod persistence;
pub mod queue;
pub mod webhook;
