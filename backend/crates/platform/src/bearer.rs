//! Bearer token extraction
//!
//! Parses `Authorization: Bearer <token>` from request headers.

use axum::http::{HeaderMap, header};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerError {
    /// Header absent or blank
    #[error("empty token")]
    Missing,

    /// Header present but not `Bearer <token>`
    #[error("malformed token")]
    Malformed,
}

/// Borrow the token out of the `Authorization` header.
///
/// The scheme name is matched case-insensitively.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?
        .trim();

    if value.is_empty() {
        return Err(BearerError::Missing);
    }

    let (scheme, token) = value.split_once(' ').ok_or(BearerError::Malformed)?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() || token.contains(' ') {
        return Err(BearerError::Malformed);
    }

    Ok(token)
}
