//! User types for spotbook.
//!
//! Users own reviews and bookmarks. The `name` field carries a uniqueness
//! constraint enforced by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// A registered user of the platform.
///
/// The password is stored verbatim as plain text. This mirrors the original
/// system's explicit design choice and is a known, accepted risk; responses
/// must never echo the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Opaque identifier assigned at creation.
    pub id: UserId,

    /// Unique display name.
    pub name: String,

    /// Plain-text password, compared verbatim at login.
    pub password: String,

    /// Number of cafes this user has visited.
    pub cafes_visited: u32,

    /// The user's average rating across their reviews.
    pub average_rating: f64,

    /// Opaque reference to an uploaded profile picture, if any.
    pub profile_picture: Option<String>,

    /// When the user was created.
    pub created_at: DateTime<Utc>,

    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh ID and zeroed counters.
    #[must_use]
    pub fn new(name: String, password: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::generate(),
            name,
            password,
            cafes_visited: 0,
            average_rating: 0.0,
            profile_picture: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_has_zeroed_counters() {
        let user = User::new("alice".into(), "hunter2".into());
        assert_eq!(user.cafes_visited, 0);
        assert!((user.average_rating - 0.0).abs() < f64::EPSILON);
        assert!(user.profile_picture.is_none());
    }
}
