//! Domain primitives, ports and services.
//!
//! Purpose: define the profile aggregate, its validated field types and the
//! service enforcing "publish once on first creation". Nothing here knows
//! about HTTP, SQL or queues; adapters reach the domain through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - UserId: opaque caller identity.
//! - UserProfile, ProfileField, ProfileFieldValue: the aggregate and its
//!   addressable fields.
//! - PhoneNumber, DiscordId, FcmToken, WebhookUrl, NotificationInterface:
//!   field value types with their syntactic rules.
//! - UserProfileService: implementation of the driving ports.

pub mod contact;
pub mod error;
pub mod notification_interface;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_profile;
pub mod user_profile_service;

pub use self::contact::{ContactValidationError, DiscordId, FcmToken, PhoneNumber, WebhookUrl};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::notification_interface::{
    NotificationInterface, NotificationInterfaces, UnknownNotificationInterface,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserValidationError};
pub use self::user_profile::{ProfileField, ProfileFieldValue, UserProfile};
pub use self::user_profile_service::UserProfileService;
