//! OpenAPI schemas for domain types.
//!
//! Domain types do not derive `ToSchema`; the wrappers here mirror their wire
//! shape so the documentation lives in the adapter layer.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The bearer credential is missing or invalid.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// No profile exists for the caller.
    #[schema(rename = "not_found")]
    NotFound,
    /// The store or queue failed, or another unexpected server error.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "whatsAppNumber must be an E.164 phone number")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field, offending value and machine code for validation failures.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::NotificationInterface`].
#[derive(ToSchema)]
#[schema(as = crate::domain::NotificationInterface)]
pub enum NotificationInterfaceSchema {
    /// E-mail delivery.
    #[schema(rename = "email")]
    Email,
    /// In-app notification centre.
    #[schema(rename = "ui")]
    Ui,
    /// WhatsApp message.
    #[schema(rename = "whatsapp")]
    WhatsApp,
    /// Discord direct message.
    #[schema(rename = "discord")]
    Discord,
    /// Telegram message.
    #[schema(rename = "telegram")]
    Telegram,
    /// HTTP callbacks.
    #[schema(rename = "webhooks")]
    Webhooks,
}
