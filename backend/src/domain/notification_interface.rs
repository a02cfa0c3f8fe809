//! Notification channels a user can opt into.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of delivery channels.
///
/// Wire values are lowercase: `email`, `ui`, `whatsapp`, `discord`,
/// `telegram`, `webhooks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationInterface {
    /// E-mail delivery.
    Email,
    /// In-app notification centre.
    Ui,
    /// WhatsApp message to `whatsAppNumber`.
    WhatsApp,
    /// Discord direct message to `discordId`.
    Discord,
    /// Telegram message to `telegramNumber`.
    Telegram,
    /// HTTP callbacks to every registered webhook.
    Webhooks,
}

impl NotificationInterface {
    /// Every member of the set, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Email,
        Self::Ui,
        Self::WhatsApp,
        Self::Discord,
        Self::Telegram,
        Self::Webhooks,
    ];

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Ui => "ui",
            Self::WhatsApp => "whatsapp",
            Self::Discord => "discord",
            Self::Telegram => "telegram",
            Self::Webhooks => "webhooks",
        }
    }

    /// Membership check against the closed set.
    ///
    /// # Examples
    /// ```
    /// use user_profile_api::domain::NotificationInterface;
    ///
    /// assert!(NotificationInterface::is_member("telegram"));
    /// assert!(!NotificationInterface::is_member("carrierPigeon"));
    /// ```
    #[must_use]
    pub fn is_member(value: &str) -> bool {
        value.parse::<Self>().is_ok()
    }
}

impl fmt::Display for NotificationInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a value is outside the notification interface set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown notification interface: {value}")]
pub struct UnknownNotificationInterface {
    /// Rejected input.
    pub value: String,
    /// Position of the rejected input within its list.
    pub index: usize,
}

impl FromStr for NotificationInterface {
    type Err = UnknownNotificationInterface;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == s)
            .ok_or_else(|| UnknownNotificationInterface {
                value: s.to_owned(),
                index: 0,
            })
    }
}

/// Order-insignificant set of opted-in channels.
///
/// Duplicates collapse onto their first occurrence so the stored value is a
/// set while keeping the caller's ordering stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationInterfaces(Vec<NotificationInterface>);

impl NotificationInterfaces {
    /// Parse every entry, rejecting the whole list on the first unknown one.
    ///
    /// # Examples
    /// ```
    /// use user_profile_api::domain::{NotificationInterface, NotificationInterfaces};
    ///
    /// let set = NotificationInterfaces::parse(["ui", "email", "ui"]).expect("valid");
    /// assert_eq!(
    ///     set.as_slice(),
    ///     &[NotificationInterface::Ui, NotificationInterface::Email]
    /// );
    ///
    /// let err = NotificationInterfaces::parse(["ui", "carrierPigeon"]).unwrap_err();
    /// assert_eq!(err.index, 1);
    /// ```
    pub fn parse<I, S>(values: I) -> Result<Self, UnknownNotificationInterface>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                value
                    .as_ref()
                    .parse::<NotificationInterface>()
                    .map_err(|err| UnknownNotificationInterface { index, ..err })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::from_iter)
    }

    /// Channels in first-seen order.
    #[must_use]
    pub fn as_slice(&self) -> &[NotificationInterface] {
        &self.0
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Wire values in first-seen order.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|i| i.as_str().to_owned()).collect()
    }
}

impl FromIterator<NotificationInterface> for NotificationInterfaces {
    fn from_iter<T: IntoIterator<Item = NotificationInterface>>(iter: T) -> Self {
        let mut values = Vec::new();
        for interface in iter {
            if !values.contains(&interface) {
                values.push(interface);
            }
        }
        Self(values)
    }
}
