//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use platform::password::{Bcrypt, CredentialVerifier};

use crate::application::{AuthenticateUseCase, TokenIssuer};
use crate::domain::repository::UserLookup;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{AuthenticateRequest, TokenResponse};

/// Shared state for auth handlers
pub struct AuthAppState<L>
where
    L: UserLookup + Sync + 'static,
{
    pub lookup: Arc<L>,
    pub verifier: Arc<dyn CredentialVerifier>,
    pub issuer: Arc<TokenIssuer>,
}

impl<L> AuthAppState<L>
where
    L: UserLookup + Sync + 'static,
{
    /// State with the bcrypt verifier.
    pub fn new(lookup: Arc<L>, issuer: Arc<TokenIssuer>) -> Self {
        Self {
            lookup,
            verifier: Arc::new(Bcrypt),
            issuer,
        }
    }
}

impl<L> Clone for AuthAppState<L>
where
    L: UserLookup + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            lookup: self.lookup.clone(),
            verifier: self.verifier.clone(),
            issuer: self.issuer.clone(),
        }
    }
}

// ============================================================================
// Authenticate
// ============================================================================

/// POST /auth
pub async fn authenticate<L>(
    State(state): State<AuthAppState<L>>,
    payload: Result<Json<AuthenticateRequest>, JsonRejection>,
) -> AuthResult<Json<TokenResponse>>
where
    L: UserLookup + Sync + 'static,
{
    let Json(req) = payload.map_err(|rejection| {
        AuthError::InvalidRequest(vec![rejection.body_text()])
    })?;

    let input = req.into_input()?;

    let use_case = AuthenticateUseCase::new(
        state.lookup.clone(),
        state.verifier.clone(),
        state.issuer.clone(),
    );

    let issued = use_case.execute(input).await?;

    Ok(Json(TokenResponse {
        token: issued.into_string(),
    }))
}
