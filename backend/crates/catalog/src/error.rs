//! Catalog Error Types
//!
//! Catalog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use auth::LookupError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Body could not be decoded or failed field validation
    #[error("invalid request")]
    InvalidRequest(Vec<String>),

    #[error("invalid id")]
    InvalidId,

    /// Resource name, e.g. `album not found`
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Unique constraint hit; carries the client-facing message
    #[error("{0}")]
    Conflict(&'static str),

    #[error("storage error")]
    Storage(#[from] sqlx::Error),

    #[error("failed to look up user")]
    Lookup(#[from] LookupError),

    #[error("failed to hash password")]
    Hash(#[from] PasswordHashError),
}

impl CatalogError {
    fn storage_unavailable(&self) -> bool {
        matches!(
            self,
            CatalogError::Storage(
                sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)
            )
        )
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::InvalidRequest(_) | CatalogError::InvalidId => ErrorKind::BadRequest,
            CatalogError::NotFound(_) => ErrorKind::NotFound,
            CatalogError::Conflict(_) => ErrorKind::Conflict,
            _ if self.storage_unavailable() => ErrorKind::ServiceUnavailable,
            CatalogError::Storage(_) | CatalogError::Lookup(_) | CatalogError::Hash(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to AppError. Storage and hashing details stay in the logs.
    pub fn into_app_error(self) -> AppError {
        match self {
            CatalogError::InvalidRequest(details) => {
                AppError::bad_request("invalid request").with_details(details)
            }
            CatalogError::Storage(source) => AppError::from(source),
            CatalogError::Lookup(_) | CatalogError::Hash(_) => {
                AppError::internal("internal server error")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            CatalogError::Storage(source) => {
                tracing::error!(error = %source, "Catalog storage failure");
            }
            CatalogError::Lookup(source) => {
                tracing::error!(error = %source, "User lookup failed");
            }
            CatalogError::Hash(source) => {
                tracing::error!(error = %source, "Password hashing failed");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
