//! Compact signed tokens (JWS, HS256)
//!
//! Thin wrapper over `jsonwebtoken` that owns the shared secret and fixes the
//! algorithm. Claim shapes belong to the callers.

use std::fmt;

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use zeroize::Zeroizing;

/// The only algorithm issued or accepted.
pub const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Error)]
pub enum SignError {
    #[error("signing key is empty")]
    MissingKey,

    #[error("failed to sign the key: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("signing key is empty")]
    MissingKey,

    #[error("token has expired")]
    Expired,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token claims are not acceptable: {0}")]
    InvalidClaims(String),

    #[error("token is malformed")]
    Malformed,
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::ExpiredSignature => VerifyError::Expired,
            JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
                VerifyError::InvalidSignature
            }
            JwtErrorKind::InvalidIssuer
            | JwtErrorKind::InvalidAudience
            | JwtErrorKind::InvalidSubject
            | JwtErrorKind::ImmatureSignature
            | JwtErrorKind::MissingRequiredClaim(_) => VerifyError::InvalidClaims(err.to_string()),
            _ => VerifyError::Malformed,
        }
    }
}

/// HMAC-SHA256 signer holding the server secret.
#[derive(Clone)]
pub struct HmacSigner {
    key: Zeroizing<Vec<u8>>,
}

impl HmacSigner {
    /// An empty secret is accepted here and rejected on every sign/verify.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            key: Zeroizing::new(secret.into()),
        }
    }

    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }

    pub fn sign<C: Serialize>(&self, claims: &C) -> Result<String, SignError> {
        if !self.has_key() {
            return Err(SignError::MissingKey);
        }

        let token = encode(
            &Header::new(ALGORITHM),
            claims,
            &EncodingKey::from_secret(&self.key),
        )?;

        Ok(token)
    }

    /// Check signature, `exp` (no leeway), `iss` and `aud`, then decode.
    pub fn verify<C: DeserializeOwned>(
        &self,
        token: &str,
        issuer: &str,
        audience: &str,
    ) -> Result<C, VerifyError> {
        if !self.has_key() {
            return Err(VerifyError::MissingKey);
        }

        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        let data = decode::<C>(token, &DecodingKey::from_secret(&self.key), &validation)?;
        Ok(data.claims)
    }
}

impl fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSigner")
            .field("key", &"[REDACTED]")
            .finish()
    }
}
