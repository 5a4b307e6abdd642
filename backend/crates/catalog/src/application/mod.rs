//! Application Layer
//!
//! Use cases shared by every resource.

pub mod crud;
pub mod seed;

pub use crate::domain::entity::user::NewUser;
pub use crud::{CrudUseCase, LIST_LIMIT};
pub use seed::ensure_user;
