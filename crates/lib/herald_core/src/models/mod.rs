//! Domain models shared across crates.

pub mod auth;
pub mod news;
pub mod users;
