//! Shared translation of pool, Diesel and deadline failures.
//!
//! Adapters pass their own error constructors so each port keeps its own
//! error type.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure onto a connection-class error.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    debug!(error = %error, "connection pool checkout failed");
    connection(error.message().to_owned())
}

/// Map a Diesel failure onto query- or connection-class errors.
///
/// Database messages are logged at debug level and replaced by a generic
/// description before leaving the adapter.
pub(crate) fn map_diesel_error<E>(
    error: diesel::result::Error,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => connection("database connection error"),
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DeserializationError(_) => query("unreadable database value"),
        _ => query("database error"),
    }
}

/// Run `operation`, failing with `on_timeout` once `deadline` elapses.
pub(crate) async fn with_deadline<T, E, F>(
    deadline: Duration,
    operation: F,
    on_timeout: impl FnOnce() -> E,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => Err(on_timeout()),
    }
}
