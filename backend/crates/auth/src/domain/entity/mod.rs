pub mod access_claims;
pub mod credential;
