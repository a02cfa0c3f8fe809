//! Shared helpers for integration suites.

pub mod embedded_postgres;
