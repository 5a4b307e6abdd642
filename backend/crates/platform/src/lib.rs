//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing and verification (bcrypt)
//! - HS256 compact token signing and verification
//! - `Authorization: Bearer` header parsing

pub mod bearer;
pub mod password;
pub mod token;
