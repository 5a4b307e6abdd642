//! Repository Traits
//!
//! The credential lookup port. Implementations live in the infrastructure
//! layer (PostgreSQL here, the in-memory user store in `catalog`).

use kernel::email::Email;

use crate::domain::entity::credential::CredentialRecord;
use crate::error::LookupError;

/// Resolve an email to the stored credential record.
///
/// `Ok(None)` means no such user; `Err` is reserved for storage faults.
/// Matching is exact (case-sensitive) against the stored email.
#[trait_variant::make(UserLookup: Send)]
pub trait LocalUserLookup {
    async fn find_by_email(&self, email: &Email) -> Result<Option<CredentialRecord>, LookupError>;
}
