//! HTTP inbound adapter exposing the profile REST endpoints.

pub mod error;
pub mod health;
pub mod identity;
pub mod schemas;
pub mod state;
pub mod user_profile;
pub mod user_profile_dto;
pub mod validation;

pub use error::ApiResult;
