//! Domain Layer
//!
//! Contains entities and the credential lookup port.

pub mod entity;
pub mod repository;

// Re-exports
pub use entity::{access_claims::AccessClaims, credential::CredentialRecord};
pub use repository::{LocalUserLookup, UserLookup};
