//! Request-body validation for the profile endpoints.
//!
//! Each helper turns raw wire input into a domain value type, or into an
//! `invalid_request` [`Error`] whose `details` name the field, the offending
//! value (and its index in list fields) and a stable machine code.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{
    ContactValidationError, DiscordId, Error, FcmToken, NotificationInterfaces, PhoneNumber,
    WebhookUrl,
};

/// Machine codes carried in `details.code` of validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidJson,
    InvalidPhoneNumber,
    InvalidNotificationInterface,
    InvalidUrl,
    EmptyFcmToken,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidJson => "invalid_json",
            Self::InvalidPhoneNumber => "invalid_phone_number",
            Self::InvalidNotificationInterface => "invalid_notification_interface",
            Self::InvalidUrl => "invalid_url",
            Self::EmptyFcmToken => "empty_fcm_token",
        }
    }
}

/// JSON member name of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const WHATSAPP_NUMBER: FieldName = FieldName::new("whatsAppNumber");
pub(crate) const DISCORD_ID: FieldName = FieldName::new("discordId");
pub(crate) const TELEGRAM_NUMBER: FieldName = FieldName::new("telegramNumber");
pub(crate) const NOTIFICATION_INTERFACES: FieldName = FieldName::new("notificationInterfaces");
pub(crate) const FCM_TOKEN: FieldName = FieldName::new("FCMtoken");
pub(crate) const WEBHOOKS: FieldName = FieldName::new("webhooks");

struct ValidationError {
    field: FieldName,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field.as_str(),
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field.as_str(),
            "value": value,
            "code": code.as_str(),
        }))
    }

    fn with_index(self, code: ErrorCode, index: usize, value: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field.as_str(),
            "index": index,
            "value": value,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("missing required field: {name}"))
        .with_code(ErrorCode::MissingField)
}

/// Unwrap an optional body member, reporting `missing_field` when absent.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_phone_number(value: String, field: FieldName) -> Result<PhoneNumber, Error> {
    PhoneNumber::new(value).map_err(|err| match err {
        ContactValidationError::InvalidPhoneNumber { value } => {
            let name = field.as_str();
            ValidationError::new(field, format!("{name} must be an E.164 phone number"))
                .with_value(ErrorCode::InvalidPhoneNumber, &value)
        }
        other => Error::invalid_request(other.to_string()),
    })
}

pub(crate) fn parse_discord_id(value: String) -> DiscordId {
    DiscordId::new(value)
}

pub(crate) fn parse_notification_interfaces(
    values: Vec<String>,
) -> Result<NotificationInterfaces, Error> {
    NotificationInterfaces::parse(values).map_err(|err| {
        ValidationError::new(NOTIFICATION_INTERFACES, err.to_string()).with_index(
            ErrorCode::InvalidNotificationInterface,
            err.index,
            &err.value,
        )
    })
}

pub(crate) fn parse_fcm_token(value: String) -> Result<FcmToken, Error> {
    FcmToken::new(value.as_str()).map_err(|err| {
        ValidationError::new(FCM_TOKEN, err.to_string())
            .with_value(ErrorCode::EmptyFcmToken, &value)
    })
}

/// Syntactic check of every URL; reachability is the service's concern.
pub(crate) fn parse_webhooks(values: Vec<String>) -> Result<Vec<WebhookUrl>, Error> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            WebhookUrl::new(value.as_str()).map_err(|err| {
                ValidationError::new(WEBHOOKS, err.to_string()).with_index(
                    ErrorCode::InvalidUrl,
                    index,
                    &value,
                )
            })
        })
        .collect()
}

/// Map body deserialisation failures onto the `invalid_json` envelope.
pub(crate) fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    let message = match &err {
        JsonPayloadError::ContentType => "request body must be application/json".to_owned(),
        other => format!("request body is not valid JSON: {other}"),
    };
    Error::invalid_request(message)
        .with_details(json!({ "code": ErrorCode::InvalidJson.as_str() }))
        .into()
}

/// JSON extractor configuration shared by the server and handler tests.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}
