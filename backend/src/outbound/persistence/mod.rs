//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel rows (`models`) and
//! domain types; the row structs and table definitions never leave the
//! outbound layer. Connections come from a `bb8` pool via `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use user_profile_api::outbound::persistence::{
//!     DbPool, DieselUserProfileRepository, PoolConfig,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/profiles")).await?;
//! let repository = DieselUserProfileRepository::new(pool, Duration::from_secs(5));
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_user_profile_repository;
mod models;
mod pool;
mod schema;

pub use diesel_user_profile_repository::DieselUserProfileRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

/// SQL migrations compiled into the binary.
pub const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
    diesel_migrations::embed_migrations!("migrations");
