//! Shared Kernel - vocabulary every feature crate agrees on
//!
//! - [`error::app_error::AppError`]: the single error type handlers answer with
//! - [`id::Id`]: typed UUID identifiers for albums and users
//! - [`email::Email`]: validated email address
//!
//! Only things whose meaning is identical in every feature live here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod email;
pub mod id;
