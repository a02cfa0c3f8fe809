//! Contact-point value types and their syntactic validation rules.
//!
//! Reachability of webhooks is not checked here; see
//! [`crate::domain::ports::WebhookProbe`].

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use url::Url;

/// Syntactic validation failures for contact fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    /// Phone number is not in E.164 form.
    #[error("phone number must be in E.164 format, e.g. +14155552671")]
    InvalidPhoneNumber {
        /// Rejected input.
        value: String,
    },
    /// Webhook URL could not be parsed as an absolute URL.
    #[error("webhook must be an absolute URL: {reason}")]
    InvalidUrl {
        /// Rejected input.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// Webhook URL uses something other than HTTP(S).
    #[error("webhook must use http or https, not {scheme}")]
    UnsupportedScheme {
        /// Rejected input.
        value: String,
        /// Offending scheme.
        scheme: String,
    },
    /// FCM token was blank.
    #[error("FCM token must not be empty")]
    EmptyFcmToken,
}

static E164_RE: OnceLock<Regex> = OnceLock::new();

fn e164_regex() -> &'static Regex {
    E164_RE.get_or_init(|| {
        Regex::new(r"^\+[1-9]\d{1,14}$")
            .unwrap_or_else(|error| panic!("E.164 regex failed to compile: {error}"))
    })
}

/// Phone number in E.164 form, or unset.
///
/// # Examples
/// ```
/// use user_profile_api::domain::PhoneNumber;
///
/// assert!(PhoneNumber::new("+14155552671").is_ok());
/// assert!(PhoneNumber::new("123").is_err());
/// assert!(PhoneNumber::new("").expect("empty clears").is_unset());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate a phone number; the empty string means "unset".
    pub fn new(value: impl Into<String>) -> Result<Self, ContactValidationError> {
        let value = value.into();
        if value.is_empty() || e164_regex().is_match(&value) {
            Ok(Self(value))
        } else {
            Err(ContactValidationError::InvalidPhoneNumber { value })
        }
    }

    /// Whether the field is unset.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }
}

/// Free-form Discord identifier; empty means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscordId(String);

impl DiscordId {
    /// Wrap a Discord identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

/// Device push token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FcmToken(String);

impl FcmToken {
    /// Validate a push token.
    pub fn new(value: impl Into<String>) -> Result<Self, ContactValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ContactValidationError::EmptyFcmToken);
        }
        Ok(Self(value))
    }
}

/// Absolute HTTP(S) callback URL.
///
/// The caller's spelling is kept verbatim so reads echo what was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookUrl(String);

impl WebhookUrl {
    /// Validate URL syntax and scheme.
    ///
    /// # Examples
    /// ```
    /// use user_profile_api::domain::WebhookUrl;
    ///
    /// assert!(WebhookUrl::new("https://hooks.example.com/in").is_ok());
    /// assert!(WebhookUrl::new("ftp://example.com").is_err());
    /// assert!(WebhookUrl::new("not a url").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, ContactValidationError> {
        let value = value.into();
        let parsed = match Url::parse(&value) {
            Ok(url) => url,
            Err(err) => {
                return Err(ContactValidationError::InvalidUrl {
                    reason: err.to_string(),
                    value,
                });
            }
        };
        match parsed.scheme() {
            "http" | "https" => Ok(Self(value)),
            other => Err(ContactValidationError::UnsupportedScheme {
                scheme: other.to_owned(),
                value,
            }),
        }
    }
}

macro_rules! string_newtype_impls {
    ($($ty:ident),* $(,)?) => {
        $(
            impl $ty {
                /// Borrow the raw value.
                #[must_use]
                pub fn as_str(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }
        )*
    };
}

string_newtype_impls!(PhoneNumber, DiscordId, FcmToken, WebhookUrl);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("+14155552671")]
    #[case("+447911123456")]
    #[case("+12")]
    #[case("+123456789012345")]
    fn accepts_e164_numbers(#[case] raw: &str) {
        let phone = PhoneNumber::new(raw).expect("valid E.164");
        assert_eq!(phone.as_ref(), raw);
    }

    #[rstest]
    #[case("123")]
    #[case("14155552671")]
    #[case("+04155552671")]
    #[case("+1")]
    #[case("+1234567890123456")]
    #[case("+1 415 555 2671")]
    fn rejects_non_e164_numbers(#[case] raw: &str) {
        assert_eq!(
            PhoneNumber::new(raw),
            Err(ContactValidationError::InvalidPhoneNumber {
                value: raw.to_owned()
            })
        );
    }

    #[rstest]
    fn empty_phone_number_is_unset() {
        assert!(PhoneNumber::new("").expect("empty allowed").is_unset());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_fcm_tokens(#[case] raw: &str) {
        assert_eq!(FcmToken::new(raw), Err(ContactValidationError::EmptyFcmToken));
    }

    #[rstest]
    #[case("http://example.com")]
    #[case("https://example.com/hooks?id=1")]
    fn keeps_webhook_spelling(#[case] raw: &str) {
        assert_eq!(WebhookUrl::new(raw).expect("valid").as_ref(), raw);
    }

    #[rstest]
    fn rejects_relative_urls() {
        let err = WebhookUrl::new("/hooks").expect_err("relative URL");
        assert!(matches!(err, ContactValidationError::InvalidUrl { .. }));
    }

    #[rstest]
    #[case("ftp://example.com/file", "ftp")]
    #[case("mailto:ops@example.com", "mailto")]
    fn rejects_non_http_schemes(#[case] raw: &str, #[case] scheme: &str) {
        let err = WebhookUrl::new(raw).expect_err("unsupported scheme");
        assert_eq!(
            err,
            ContactValidationError::UnsupportedScheme {
                value: raw.to_owned(),
                scheme: scheme.to_owned(),
            }
        );
    }
}
