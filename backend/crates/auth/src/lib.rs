//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Credential record, access claims, `UserLookup` port
//! - `application/` - Authenticate use case and token issuance
//! - `infra/` - PostgreSQL lookup
//! - `presentation/` - `POST /auth` handler, bearer middleware, router
//!
//! ## Flow
//! `authenticate(email, password)` looks the user up by email, verifies the
//! password against the stored bcrypt hash, then signs an HS256 token that
//! is valid for one hour. No server-side session state is kept: protected
//! routes check the token signature through [`require_bearer`].

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token_issuer::TokenIssuer;
pub use domain::entity::{access_claims::AccessClaims, credential::CredentialRecord};
pub use domain::repository::{LocalUserLookup, UserLookup};
pub use error::{AuthError, AuthResult, LookupError, TokenIssueError};
pub use infra::postgres::PgUserLookup;
pub use presentation::{AuthAppState, auth_router, require_bearer};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
