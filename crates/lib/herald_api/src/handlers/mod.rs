//! Request handlers.

pub mod admin;
pub mod news;
pub mod system;
pub mod users;
