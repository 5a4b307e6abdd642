//! Authenticate Use Case
//!
//! Email + password in, signed token out. Lookup, then verify, then issue;
//! each step runs only if the previous one succeeded, and nothing is
//! retried or remembered between calls.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::email::Email;
use platform::password::{ClearTextPassword, CredentialVerifier};

use crate::application::token_issuer::{IssuedToken, TokenIssuer};
use crate::domain::repository::UserLookup;
use crate::error::{AuthError, AuthResult};

/// Authenticate input
#[derive(Debug)]
pub struct AuthenticateInput {
    pub email: Email,
    pub password: ClearTextPassword,
}

pub struct AuthenticateUseCase<L, V>
where
    L: UserLookup,
    V: CredentialVerifier + ?Sized,
{
    lookup: Arc<L>,
    verifier: Arc<V>,
    issuer: Arc<TokenIssuer>,
}

impl<L, V> AuthenticateUseCase<L, V>
where
    L: UserLookup,
    V: CredentialVerifier + ?Sized,
{
    pub fn new(lookup: Arc<L>, verifier: Arc<V>, issuer: Arc<TokenIssuer>) -> Self {
        Self {
            lookup,
            verifier,
            issuer,
        }
    }

    pub async fn execute(&self, input: AuthenticateInput) -> AuthResult<IssuedToken> {
        self.execute_at(input, Utc::now()).await
    }

    /// Same as [`Self::execute`] with an explicit issuance instant.
    pub async fn execute_at(
        &self,
        input: AuthenticateInput,
        now: DateTime<Utc>,
    ) -> AuthResult<IssuedToken> {
        let record = match self.lookup.find_by_email(&input.email).await {
            Ok(Some(record)) => record,
            Ok(None) => return Err(AuthError::UserNotFound),
            Err(e) => return Err(AuthError::AuthenticationFailed(e)),
        };

        if !self.verifier.verify(&input.password, &record.password_hash) {
            return Err(AuthError::PasswordMismatch);
        }

        let issued = self.issuer.issue(&record, now)?;

        tracing::info!(
            user_id = %record.id,
            expires_at = issued.expires_at,
            "User authenticated"
        );

        Ok(issued)
    }
}
