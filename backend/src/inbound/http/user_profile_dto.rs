//! Wire shapes for the profile endpoints.
//!
//! Member names are fixed by existing clients (`whatsAppNumber`,
//! `FCMtokens`, ...). Request members are optional so an absent member
//! becomes a `missing_field` error rather than a generic JSON failure.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ProfileFieldValue, UserProfile};
use crate::inbound::http::schemas::NotificationInterfaceSchema;

/// `PUT /user/whatsapp` body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppNumberRequest {
    /// E.164 number, or empty to clear.
    #[schema(example = "+14155552671")]
    pub whats_app_number: Option<String>,
}

/// `PUT /user/discord` body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscordIdRequest {
    /// Free-form identifier, or empty to clear.
    pub discord_id: Option<String>,
}

/// `PUT /user/telegram` body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TelegramNumberRequest {
    /// E.164 number, or empty to clear.
    #[schema(example = "+447700900123")]
    pub telegram_number: Option<String>,
}

/// `PUT /user/notificationInterfaces` body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationInterfacesRequest {
    /// Replacement set.
    #[schema(value_type = Option<Vec<NotificationInterfaceSchema>>)]
    pub notification_interfaces: Option<Vec<String>>,
}

/// `PUT /user/webhooks` body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct WebhooksRequest {
    /// Replacement list; every URL must answer a probe with 200.
    pub webhooks: Option<Vec<String>>,
}

/// `PUT` and `DELETE /user/fcmTokens` body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct FcmTokenRequest {
    /// Device push token.
    #[serde(rename = "FCMtoken")]
    pub fcm_token: Option<String>,
}

/// `PUT /user` result.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertResponse {
    /// Whether this call created the profile.
    pub is_upserted: bool,
}

/// Plain acknowledgement.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Full profile.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    /// Owner identity.
    pub user_id: String,
    /// Opted-in channels.
    #[schema(value_type = Vec<NotificationInterfaceSchema>)]
    pub notification_interfaces: Vec<String>,
    /// Push tokens in insertion order.
    #[serde(rename = "FCMtokens")]
    pub fcm_tokens: Vec<String>,
    /// E.164 number or empty.
    pub whats_app_number: String,
    /// Discord identifier or empty.
    pub discord_id: String,
    /// E.164 number or empty.
    pub telegram_number: String,
    /// Registered callback URLs.
    pub webhooks: Vec<String>,
    /// RFC 3339 creation time.
    pub created_at: String,
    /// RFC 3339 time of the last mutation.
    pub updated_at: String,
}

impl From<UserProfile> for UserProfileResponse {
    fn from(value: UserProfile) -> Self {
        Self {
            user_id: value.user_id.into(),
            notification_interfaces: value.notification_interfaces.to_strings(),
            fcm_tokens: value.fcm_tokens.into_iter().map(String::from).collect(),
            whats_app_number: value.whatsapp_number.into(),
            discord_id: value.discord_id.into(),
            telegram_number: value.telegram_number.into(),
            webhooks: value.webhooks.into_iter().map(String::from).collect(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// `{"whatsAppNumber": ...}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppNumberResponse {
    /// Stored value.
    pub whats_app_number: String,
}

/// `{"discordId": ...}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscordIdResponse {
    /// Stored value.
    pub discord_id: String,
}

/// `{"telegramNumber": ...}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TelegramNumberResponse {
    /// Stored value.
    pub telegram_number: String,
}

/// `{"notificationInterfaces": [...]}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationInterfacesResponse {
    /// Stored set.
    #[schema(value_type = Vec<NotificationInterfaceSchema>)]
    pub notification_interfaces: Vec<String>,
}

/// `{"FCMtokens": [...]}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FcmTokensResponse {
    /// Stored tokens.
    #[serde(rename = "FCMtokens")]
    pub fcm_tokens: Vec<String>,
}

/// `{"FCMtoken": ...}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FcmTokenResponse {
    /// Token that was added or removed.
    #[serde(rename = "FCMtoken")]
    pub fcm_token: String,
}

/// `{"webhooks": [...]}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WebhooksResponse {
    /// Stored URLs.
    pub webhooks: Vec<String>,
}

/// Any single-field echo or projection.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ProfileFieldResponse {
    /// See [`WhatsAppNumberResponse`].
    WhatsAppNumber(WhatsAppNumberResponse),
    /// See [`DiscordIdResponse`].
    DiscordId(DiscordIdResponse),
    /// See [`TelegramNumberResponse`].
    TelegramNumber(TelegramNumberResponse),
    /// See [`NotificationInterfacesResponse`].
    NotificationInterfaces(NotificationInterfacesResponse),
    /// See [`FcmTokensResponse`].
    FcmTokens(FcmTokensResponse),
    /// See [`WebhooksResponse`].
    Webhooks(WebhooksResponse),
}

impl From<ProfileFieldValue> for ProfileFieldResponse {
    fn from(value: ProfileFieldValue) -> Self {
        match value {
            ProfileFieldValue::WhatsAppNumber(number) => {
                Self::WhatsAppNumber(WhatsAppNumberResponse {
                    whats_app_number: number.into(),
                })
            }
            ProfileFieldValue::DiscordId(id) => Self::DiscordId(DiscordIdResponse {
                discord_id: id.into(),
            }),
            ProfileFieldValue::TelegramNumber(number) => {
                Self::TelegramNumber(TelegramNumberResponse {
                    telegram_number: number.into(),
                })
            }
            ProfileFieldValue::NotificationInterfaces(set) => {
                Self::NotificationInterfaces(NotificationInterfacesResponse {
                    notification_interfaces: set.to_strings(),
                })
            }
            ProfileFieldValue::FcmTokens(tokens) => Self::FcmTokens(FcmTokensResponse {
                fcm_tokens: tokens.into_iter().map(String::from).collect(),
            }),
            ProfileFieldValue::Webhooks(urls) => Self::Webhooks(WebhooksResponse {
                webhooks: urls.into_iter().map(String::from).collect(),
            }),
        }
    }
}
