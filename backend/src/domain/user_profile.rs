//! The user profile aggregate and its individually addressable fields.

use chrono::{DateTime, Utc};

use super::contact::{DiscordId, FcmToken, PhoneNumber, WebhookUrl};
use super::notification_interface::NotificationInterfaces;
use super::user::UserId;

/// One user's notification preferences.
///
/// ## Invariants
/// - At most one profile exists per `user_id`.
/// - `created_at` is fixed at first upsert; `updated_at >= created_at` and
///   moves on every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Owner identity.
    pub user_id: UserId,
    /// Opted-in channels.
    pub notification_interfaces: NotificationInterfaces,
    /// Device push tokens in insertion order, duplicates allowed.
    pub fcm_tokens: Vec<FcmToken>,
    /// WhatsApp number, possibly unset.
    pub whatsapp_number: PhoneNumber,
    /// Discord identifier, possibly unset.
    pub discord_id: DiscordId,
    /// Telegram number, possibly unset.
    pub telegram_number: PhoneNumber,
    /// Registered callback URLs.
    pub webhooks: Vec<WebhookUrl>,
    /// First upsert time.
    pub created_at: DateTime<Utc>,
    /// Last mutation time.
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Fresh profile with every optional field at its zero value.
    #[must_use]
    pub fn new(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            notification_interfaces: NotificationInterfaces::default(),
            fcm_tokens: Vec::new(),
            whatsapp_number: PhoneNumber::default(),
            discord_id: DiscordId::default(),
            telegram_number: PhoneNumber::default(),
            webhooks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Project a single field.
    #[must_use]
    pub fn field(&self, field: ProfileField) -> ProfileFieldValue {
        match field {
            ProfileField::WhatsAppNumber => {
                ProfileFieldValue::WhatsAppNumber(self.whatsapp_number.clone())
            }
            ProfileField::DiscordId => ProfileFieldValue::DiscordId(self.discord_id.clone()),
            ProfileField::TelegramNumber => {
                ProfileFieldValue::TelegramNumber(self.telegram_number.clone())
            }
            ProfileField::NotificationInterfaces => {
                ProfileFieldValue::NotificationInterfaces(self.notification_interfaces.clone())
            }
            ProfileField::FcmTokens => ProfileFieldValue::FcmTokens(self.fcm_tokens.clone()),
            ProfileField::Webhooks => ProfileFieldValue::Webhooks(self.webhooks.clone()),
        }
    }

    /// Overwrite a single field and stamp `updated_at`.
    pub fn apply(&mut self, value: ProfileFieldValue, now: DateTime<Utc>) {
        match value {
            ProfileFieldValue::WhatsAppNumber(v) => self.whatsapp_number = v,
            ProfileFieldValue::DiscordId(v) => self.discord_id = v,
            ProfileFieldValue::TelegramNumber(v) => self.telegram_number = v,
            ProfileFieldValue::NotificationInterfaces(v) => self.notification_interfaces = v,
            ProfileFieldValue::FcmTokens(v) => self.fcm_tokens = v,
            ProfileFieldValue::Webhooks(v) => self.webhooks = v,
        }
        self.updated_at = now;
    }
}

/// Individually readable and writable profile fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    /// `whatsAppNumber`
    WhatsAppNumber,
    /// `discordId`
    DiscordId,
    /// `telegramNumber`
    TelegramNumber,
    /// `notificationInterfaces`
    NotificationInterfaces,
    /// `FCMtokens`
    FcmTokens,
    /// `webhooks`
    Webhooks,
}

impl ProfileField {
    /// JSON member name used on the wire.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::WhatsAppNumber => "whatsAppNumber",
            Self::DiscordId => "discordId",
            Self::TelegramNumber => "telegramNumber",
            Self::NotificationInterfaces => "notificationInterfaces",
            Self::FcmTokens => "FCMtokens",
            Self::Webhooks => "webhooks",
        }
    }
}

/// Validated value for one [`ProfileField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileFieldValue {
    /// WhatsApp number.
    WhatsAppNumber(PhoneNumber),
    /// Discord identifier.
    DiscordId(DiscordId),
    /// Telegram number.
    TelegramNumber(PhoneNumber),
    /// Opted-in channels.
    NotificationInterfaces(NotificationInterfaces),
    /// Push tokens.
    FcmTokens(Vec<FcmToken>),
    /// Callback URLs.
    Webhooks(Vec<WebhookUrl>),
}

impl ProfileFieldValue {
    /// Field this value belongs to.
    #[must_use]
    pub const fn field(&self) -> ProfileField {
        match self {
            Self::WhatsAppNumber(_) => ProfileField::WhatsAppNumber,
            Self::DiscordId(_) => ProfileField::DiscordId,
            Self::TelegramNumber(_) => ProfileField::TelegramNumber,
            Self::NotificationInterfaces(_) => ProfileField::NotificationInterfaces,
            Self::FcmTokens(_) => ProfileField::FcmTokens,
            Self::Webhooks(_) => ProfileField::Webhooks,
        }
    }
}
