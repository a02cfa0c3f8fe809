//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit in front of every handler.
//! Currently only trace-id propagation.

pub mod trace;

pub use trace::Trace;
