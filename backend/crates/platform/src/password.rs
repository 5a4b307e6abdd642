//! Password Hashing and Verification
//!
//! bcrypt-based credential handling with:
//! - salted adaptive hashing, cost embedded in the output
//! - zeroization of the cleartext buffer on drop
//! - redacted `Debug` for both cleartext and hash
//!
//! The [`CredentialVerifier`] trait is the seam the authenticator depends on;
//! [`Bcrypt`] is the production implementation.

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// bcrypt only reads the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Work factor used when no cost is configured
pub const DEFAULT_COST: u32 = 10;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("password is required")]
    Empty,

    #[error("password must be at least {min} characters")]
    TooShort { min: usize, actual: usize },

    #[error("password must be at most {max} bytes")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("password hashing failed: {0}")]
    HashingFailed(#[from] bcrypt::BcryptError),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization.
///
/// Not `Clone`, and `Debug` prints `[REDACTED]`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Validate length bounds and take ownership of the buffer.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self(raw);

        if password.0.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        let char_count = password.0.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if password.0.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_BYTES,
                actual: password.0.len(),
            });
        }

        Ok(password)
    }

    /// Skip the length policy. For stored-credential checks and tests.
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// bcrypt hash string (`$2b$<cost>$<salt><digest>`).
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wrap a stored hash. Not validated: a malformed value simply never verifies.
    pub fn from_db(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HashedPassword").field(&"[HASH]").finish()
    }
}

// ============================================================================
// Credential Verifier
// ============================================================================

/// Salted adaptive hash and compare.
///
/// Implementations are stateless and safe to share between tasks.
pub trait CredentialVerifier: Send + Sync {
    /// Hash with a fresh salt. Two calls on the same input differ.
    fn hash(
        &self,
        password: &ClearTextPassword,
        cost: u32,
    ) -> Result<HashedPassword, PasswordHashError>;

    /// `true` iff `password` matches `hash`. Malformed hashes yield `false`.
    fn verify(&self, password: &ClearTextPassword, hash: &HashedPassword) -> bool;
}

/// bcrypt, constant-time comparison inside the primitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bcrypt;

impl CredentialVerifier for Bcrypt {
    fn hash(
        &self,
        password: &ClearTextPassword,
        cost: u32,
    ) -> Result<HashedPassword, PasswordHashError> {
        let hash = bcrypt::hash(password.expose(), cost)?;
        Ok(HashedPassword(hash))
    }

    fn verify(&self, password: &ClearTextPassword, hash: &HashedPassword) -> bool {
        bcrypt::verify(password.expose(), hash.as_str()).unwrap_or(false)
    }
}

// ============================================================================
// Tests
// ============================================================================
