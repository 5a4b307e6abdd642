//! Presentation Layer
//!
//! Generic HTTP handlers and the router that mounts them per resource.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::CrudState;
pub use router::crud_router;
