//! API DTOs (Data Transfer Objects)
//!
//! Resource bodies and views live with their entities; this holds the shapes
//! shared by every resource.

use serde::Serialize;

/// `{"message": "Created"}` and friends
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub const CREATED: Self = Self { message: "Created" };
    pub const UPDATED: Self = Self { message: "Updated" };
    pub const DELETED: Self = Self { message: "Deleted" };
}
