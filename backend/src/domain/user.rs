//! User identity.
//!
//! The profile service never mints identities; it receives them from the
//! identity verifier and treats them as opaque strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest identifier accepted from the identity provider.
pub const USER_ID_MAX: usize = 128;

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was empty.
    EmptyId,
    /// The identifier had leading or trailing whitespace.
    PaddedId,
    /// The identifier exceeded [`USER_ID_MAX`] characters.
    IdTooLong {
        /// Maximum permitted length.
        max: usize,
    },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::PaddedId => write!(f, "user id must not have surrounding whitespace"),
            Self::IdTooLong { max } => write!(f, "user id must be at most {max} characters"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Opaque external identity of a profile owner.
///
/// # Examples
/// ```
/// use user_profile_api::domain::UserId;
///
/// let id = UserId::new("auth0|42").expect("valid id");
/// assert_eq!(id.as_ref(), "auth0|42");
/// assert!(UserId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::PaddedId);
        }
        if id.chars().count() > USER_ID_MAX {
            return Err(UserValidationError::IdTooLong { max: USER_ID_MAX });
        }
        Ok(Self(id))
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
