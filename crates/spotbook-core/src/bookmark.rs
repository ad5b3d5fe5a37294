//! Bookmark types for spotbook.
//!
//! A bookmark is a user's saved reference to a cafe. At most one live bookmark
//! may exist for a given (user, cafe) pair at any time; the store enforces
//! this during insertion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BookmarkId, CafeId, UserId};

/// A user's saved reference to a cafe.
///
/// Bookmarks hold non-owning references to their user and cafe by ID and must
/// tolerate either referent being absent at read time. `bookmarked_at` is set
/// once at creation and never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    /// Opaque identifier assigned at creation.
    pub id: BookmarkId,

    /// The user who created the bookmark.
    pub user_id: UserId,

    /// The cafe being bookmarked.
    pub cafe_id: CafeId,

    /// When the bookmark was created. Immutable after creation.
    pub bookmarked_at: DateTime<Utc>,
}

impl Bookmark {
    /// Create a new bookmark timestamped with the current time.
    #[must_use]
    pub fn new(user_id: UserId, cafe_id: CafeId) -> Self {
        Self {
            id: BookmarkId::generate(),
            user_id,
            cafe_id,
            bookmarked_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bookmark_references_its_pair() {
        let user_id = UserId::generate();
        let cafe_id = CafeId::generate();
        let bookmark = Bookmark::new(user_id, cafe_id);
        assert_eq!(bookmark.user_id, user_id);
        assert_eq!(bookmark.cafe_id, cafe_id);
    }

    #[test]
    fn bookmark_serializes_timestamp_as_rfc3339() {
        let bookmark = Bookmark::new(UserId::generate(), CafeId::generate());
        let json = serde_json::to_value(&bookmark).unwrap();
        let ts = json["bookmarked_at"].as_str().unwrap();
        assert!(ts.parse::<DateTime<Utc>>().is_ok());
    }
}
