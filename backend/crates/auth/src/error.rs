//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::bearer::BearerError;
use platform::token::{SignError, VerifyError};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Failure reported by a [`crate::domain::repository::UserLookup`] backend.
///
/// "No such user" is not an error: lookups return `Ok(None)` for that.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("malformed credential record: {0}")]
    MalformedRecord(String),

    #[error("credential storage unavailable: {0}")]
    Unavailable(String),
}

/// Why a token could not be produced. Both causes surface as
/// [`AuthError::TokenIssuanceFailed`].
#[derive(Debug, Error)]
pub enum TokenIssueError {
    #[error("claim is empty: {claim}")]
    EmptyClaim { claim: &'static str },

    #[error("failed to sign the key")]
    Sign(#[from] SignError),
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Body could not be decoded or failed field validation
    #[error("invalid request")]
    InvalidRequest(Vec<String>),

    #[error("user not found")]
    UserNotFound,

    #[error("wrong password")]
    PasswordMismatch,

    /// Lookup failed for a reason other than "not found"
    #[error("authentication failed")]
    AuthenticationFailed(#[source] LookupError),

    #[error("failed to issue token")]
    TokenIssuanceFailed(#[from] TokenIssueError),

    #[error("empty token")]
    MissingToken,

    #[error("malformed token")]
    MalformedToken,

    #[error("unauthorized")]
    InvalidToken(#[source] VerifyError),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidRequest(_) | AuthError::MissingToken | AuthError::MalformedToken => {
                StatusCode::BAD_REQUEST
            }
            AuthError::UserNotFound | AuthError::PasswordMismatch | AuthError::InvalidToken(_) => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::AuthenticationFailed(_) | AuthError::TokenIssuanceFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidRequest(_) | AuthError::MissingToken | AuthError::MalformedToken => {
                ErrorKind::BadRequest
            }
            AuthError::UserNotFound | AuthError::PasswordMismatch | AuthError::InvalidToken(_) => {
                ErrorKind::Unauthorized
            }
            AuthError::AuthenticationFailed(_) | AuthError::TokenIssuanceFailed(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError. Sources stay out of the client-facing body.
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            AuthError::InvalidRequest(details) => err.with_details(details.iter().cloned()),
            _ => err,
        }
    }

    fn log(&self) {
        match self {
            AuthError::AuthenticationFailed(source) => {
                tracing::error!(error = %source, "Credential lookup failed");
            }
            AuthError::TokenIssuanceFailed(TokenIssueError::EmptyClaim { claim }) => {
                tracing::error!(claim = *claim, "Token not issued: empty claim");
            }
            AuthError::TokenIssuanceFailed(TokenIssueError::Sign(source)) => {
                tracing::error!(error = %source, "Token not issued: signing failed");
            }
            AuthError::UserNotFound | AuthError::PasswordMismatch => {
                tracing::warn!(reason = %self, "Authentication rejected");
            }
            AuthError::InvalidToken(source) => {
                tracing::debug!(error = %source, "Bearer token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<BearerError> for AuthError {
    fn from(err: BearerError) -> Self {
        match err {
            BearerError::Missing => AuthError::MissingToken,
            BearerError::Malformed => AuthError::MalformedToken,
        }
    }
}
