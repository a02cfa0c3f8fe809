//! HS256 JWT verification resolving the `sub` claim to a [`UserId`].

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use tracing::debug;

use crate::domain::UserId;
use crate::domain::ports::{IdentityVerificationError, IdentityVerifier};

/// Shared secret plus optional issuer and audience constraints.
#[derive(Clone, Default)]
pub struct JwtVerifierConfig {
    /// HMAC secret.
    pub secret: String,
    /// Required `iss` claim, if any.
    pub issuer: Option<String>,
    /// Required `aud` claim, if any.
    pub audience: Option<String>,
}

impl std::fmt::Debug for JwtVerifierConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifierConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: String,
}

/// Verifies bearer tokens signed with a shared HS256 secret.
#[derive(Clone)]
pub struct JwtIdentityVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityVerifier {
    /// Build a verifier; `exp` is always required.
    #[must_use]
    pub fn new(config: &JwtVerifierConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }
}

fn describe(kind: &ErrorKind) -> &'static str {
    match kind {
        ErrorKind::ExpiredSignature => "token expired",
        ErrorKind::InvalidSignature => "signature mismatch",
        ErrorKind::InvalidIssuer => "unexpected issuer",
        ErrorKind::InvalidAudience => "unexpected audience",
        ErrorKind::InvalidAlgorithm => "unsupported algorithm",
        _ => "malformed token",
    }
}

#[async_trait]
impl IdentityVerifier for JwtIdentityVerifier {
    async fn verify(&self, credential: &str) -> Result<UserId, IdentityVerificationError> {
        let data = decode::<Claims>(credential, &self.key, &self.validation).map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            IdentityVerificationError::rejected(describe(err.kind()))
        })?;
        UserId::new(data.claims.sub).map_err(|_| IdentityVerificationError::missing_subject())
    }
}
