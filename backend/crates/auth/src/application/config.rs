//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;

/// Auth application configuration
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// HS256 signing secret. Empty is tolerated at startup; every issuance
    /// then fails with `TokenIssuanceFailed`.
    pub jwt_secret: String,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
        }
    }

    pub fn has_secret(&self) -> bool {
        !self.jwt_secret.is_empty()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .finish()
    }
}
