//! Credential Record
//!
//! The slice of a stored user the authenticator needs: who they are and
//! the hash to check a password against. Read-only from this crate's side.

use kernel::email::Email;
use kernel::id::UserId;
use platform::password::HashedPassword;

#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub id: UserId,
    pub display_name: String,
    pub email: Email,
    pub password_hash: HashedPassword,
}
