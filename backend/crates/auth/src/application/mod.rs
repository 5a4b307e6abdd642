//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod token_issuer;

// Re-exports
pub use authenticate::{AuthenticateInput, AuthenticateUseCase};
pub use config::AuthConfig;
pub use token_issuer::{IssuedToken, TokenIssuer};
