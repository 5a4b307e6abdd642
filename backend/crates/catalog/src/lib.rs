//! Catalog Backend Module
//!
//! Generic CRUD over the resources the API exposes (albums and users).
//!
//! Clean Architecture structure:
//! - `domain/` - `Resource` trait, `Album` and `User` entities, `CrudRepository` port
//! - `application/` - `CrudUseCase` and the bootstrap user
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - generic handlers and router
//!
//! Adding a resource means implementing [`Resource`] (and [`infra::PgResource`]
//! for the Postgres backend); the use case, repositories and routes are shared.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::{CrudUseCase, LIST_LIMIT, NewUser, ensure_user};
pub use domain::entity::{album::Album, user::User};
pub use domain::repository::{CrudRepository, LocalCrudRepository};
pub use domain::resource::{BuildContext, Resource};
pub use error::{CatalogError, CatalogResult};
pub use infra::{MemoryRepository, PgCrudRepository};
pub use presentation::{CrudState, crud_router};
