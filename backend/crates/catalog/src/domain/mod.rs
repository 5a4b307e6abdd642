//! Domain Layer
//!
//! Entities, the `Resource` abstraction, and the repository port.

pub mod entity;
pub mod repository;
pub mod resource;
