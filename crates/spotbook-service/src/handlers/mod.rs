//! API handlers.

pub mod bookmarks;
pub mod cafes;
pub mod health;
pub mod reviews;
pub mod users;
