//! Access Claims
//!
//! Payload of the signed token handed out by `POST /auth`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::credential::CredentialRecord;
use crate::error::TokenIssueError;

/// `iss` of every token this service signs
pub const TOKEN_ISSUER: &str = "Hexagony";

/// `aud` of every token this service signs
pub const TOKEN_AUDIENCE: &str = "Clean Architecture";

/// Validity window, fixed at one hour
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id
    pub sub: String,
    pub name: String,
    pub email: String,
    pub iss: String,
    pub aud: String,
    /// Unix seconds
    pub iat: i64,
    /// Unix seconds, always `iat + TOKEN_TTL_SECS`
    pub exp: i64,
}

impl AccessClaims {
    pub fn for_record(record: &CredentialRecord, issued_at: DateTime<Utc>) -> Self {
        let expires_at = issued_at + Duration::seconds(TOKEN_TTL_SECS);

        Self {
            sub: record.id.to_string(),
            name: record.display_name.clone(),
            email: record.email.as_str().to_string(),
            iss: TOKEN_ISSUER.to_string(),
            aud: TOKEN_AUDIENCE.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Every string claim must carry a value before signing.
    pub fn ensure_complete(&self) -> Result<(), TokenIssueError> {
        let claims = [
            ("sub", &self.sub),
            ("name", &self.name),
            ("email", &self.email),
            ("iss", &self.iss),
            ("aud", &self.aud),
        ];

        match claims.iter().find(|(_, value)| value.is_empty()) {
            Some((claim, _)) => Err(TokenIssueError::EmptyClaim { claim: *claim }),
            None => Ok(()),
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.sub.parse().ok()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}
