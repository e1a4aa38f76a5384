//! # herald_core
//!
//! Core domain logic for Herald: administrator credentials, token signing,
//! request authorization, and persistence for users and news posts.

pub mod auth;
pub mod db;
pub mod migrate;
pub mod models;
pub mod news;
pub mod users;
