//! Business flows behind the handlers.

pub mod admin;
pub mod news;
pub mod users;

/// A supplied, non-empty request field.
pub(crate) fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
