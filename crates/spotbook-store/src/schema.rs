//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Primary user records, keyed by `user_id` (ULID).
    pub const USERS: &str = "users";

    /// Index: user ID by name, keyed by the UTF-8 name bytes.
    /// Backs the unique-name constraint and login lookup.
    pub const USERS_BY_NAME: &str = "users_by_name";

    /// Primary cafe records, keyed by `cafe_id` (ULID).
    pub const CAFES: &str = "cafes";

    /// Primary review records, keyed by `review_id` (ULID).
    pub const REVIEWS: &str = "reviews";

    /// Index: reviews by cafe, keyed by `cafe_id || review_id`.
    /// Value is empty (index only).
    pub const REVIEWS_BY_CAFE: &str = "reviews_by_cafe";

    /// Primary bookmark records, keyed by `bookmark_id` (ULID).
    pub const BOOKMARKS: &str = "bookmarks";

    /// Index: bookmarks by user, keyed by `user_id || bookmark_id`.
    /// Value is empty (index only). ULID ordering makes a prefix scan
    /// yield bookmarks in creation order.
    pub const BOOKMARKS_BY_USER: &str = "bookmarks_by_user";

    /// Uniqueness index: one entry per live (user, cafe) pair, keyed by
    /// `user_id || cafe_id`, value is the bookmark ID bytes.
    pub const BOOKMARK_PAIRS: &str = "bookmark_pairs";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::USERS,
        cf::USERS_BY_NAME,
        cf::CAFES,
        cf::REVIEWS,
        cf::REVIEWS_BY_CAFE,
        cf::BOOKMARKS,
        cf::BOOKMARKS_BY_USER,
        cf::BOOKMARK_PAIRS,
    ]
}
