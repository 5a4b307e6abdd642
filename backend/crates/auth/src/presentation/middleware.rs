//! Auth Middleware
//!
//! Middleware for requiring a bearer token on protected routes.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer;

use crate::application::TokenIssuer;
use crate::error::AuthError;

/// Reject requests without a valid `Authorization: Bearer` token.
///
/// - no header: 400 `empty token`
/// - not `Bearer <token>`: 400 `malformed token`
/// - bad signature, expired, wrong issuer or audience: 401
///
/// On success the decoded [`crate::AccessClaims`] are inserted into the
/// request extensions.
///
/// ```ignore
/// router.layer(axum::middleware::from_fn_with_state(issuer, require_bearer))
/// ```
pub async fn require_bearer(
    State(issuer): State<Arc<TokenIssuer>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer(req.headers())?;
    let claims = issuer.verify(token).map_err(AuthError::InvalidToken)?;

    tracing::debug!(user_id = %claims.sub, "Bearer token accepted");

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
