//! Infrastructure Layer

pub mod memory;
pub mod postgres;

pub use memory::MemoryRepository;
pub use postgres::{PgCrudRepository, PgResource};
