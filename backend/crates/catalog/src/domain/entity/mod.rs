pub mod album;
pub mod user;
