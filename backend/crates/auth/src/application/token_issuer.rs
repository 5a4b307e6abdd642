//! Token Issuer
//!
//! Builds [`AccessClaims`] for a verified credential and signs them, and
//! checks tokens presented back on protected routes.

use std::fmt;

use chrono::{DateTime, Utc};
use platform::token::{HmacSigner, VerifyError};

use crate::application::config::AuthConfig;
use crate::domain::entity::access_claims::{AccessClaims, TOKEN_AUDIENCE, TOKEN_ISSUER};
use crate::domain::entity::credential::CredentialRecord;
use crate::error::TokenIssueError;

/// A signed compact token. Not tracked after it is handed out.
pub struct IssuedToken {
    token: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl IssuedToken {
    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn into_string(self) -> String {
        self.token
    }
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"[REDACTED]")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct TokenIssuer {
    signer: HmacSigner,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            signer: HmacSigner::new(config.jwt_secret.as_bytes()),
        }
    }

    pub fn issue(
        &self,
        record: &CredentialRecord,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenIssueError> {
        let claims = AccessClaims::for_record(record, now);
        claims.ensure_complete()?;

        let token = self.signer.sign(&claims)?;

        Ok(IssuedToken {
            token,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }

    /// Signature, expiry, issuer and audience must all check out.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, VerifyError> {
        self.signer.verify(token, TOKEN_ISSUER, TOKEN_AUDIENCE)
    }
}
