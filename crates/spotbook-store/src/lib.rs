//! `RocksDB` storage layer for spotbook.
//!
//! This crate provides persistent storage for users, cafes, reviews, and
//! bookmarks using `RocksDB` with column families for efficient indexing.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `users`: Primary user records, keyed by `user_id` (ULID)
//! - `users_by_name`: Unique-name index, keyed by name
//! - `cafes`: Primary cafe records, keyed by `cafe_id` (ULID)
//! - `reviews`: Primary review records, keyed by `review_id` (ULID)
//! - `reviews_by_cafe`: Index for listing reviews by cafe
//! - `bookmarks`: Primary bookmark records, keyed by `bookmark_id` (ULID)
//! - `bookmarks_by_user`: Index for listing bookmarks by user
//! - `bookmark_pairs`: Uniqueness index, one entry per live (user, cafe) pair
//!
//! # Example
//!
//! ```no_run
//! use spotbook_store::{RocksStore, Store};
//! use spotbook_core::User;
//!
//! let store = RocksStore::open("/tmp/spotbook-db").unwrap();
//!
//! let user = User::new("alice".into(), "hunter2".into());
//! store.create_user(&user).unwrap();
//!
//! let retrieved = store.get_user(&user.id).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use spotbook_core::{Bookmark, BookmarkId, Cafe, CafeId, Review, ReviewId, User, UserId};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations. Listings iterate in insertion order (ULID key order) and
/// clamp `offset`/`limit` silently to the available range.
pub trait Store: Send + Sync {
    // =========================================================================
    // User Operations
    // =========================================================================

    /// Insert a new user record, enforcing the unique-name constraint.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateName` if a user with this name already
    /// exists, or an error if the database operation fails.
    fn create_user(&self, user: &User) -> Result<()>;

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_user(&self, user_id: &UserId) -> Result<Option<User>>;

    /// Get a user by name via the name index.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_user_by_name(&self, name: &str) -> Result<Option<User>>;

    /// List users in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_users(&self, offset: usize, limit: usize) -> Result<Vec<User>>;

    /// Replace an existing user record, maintaining the name index.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user doesn't exist, or
    /// `StoreError::DuplicateName` if renaming to a taken name.
    fn update_user(&self, user: &User) -> Result<()>;

    /// Delete a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user doesn't exist.
    fn delete_user(&self, user_id: &UserId) -> Result<()>;

    // =========================================================================
    // Cafe Operations
    // =========================================================================

    /// Insert a new cafe record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn create_cafe(&self, cafe: &Cafe) -> Result<()>;

    /// Get a cafe by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_cafe(&self, cafe_id: &CafeId) -> Result<Option<Cafe>>;

    /// List cafes in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_cafes(&self, offset: usize, limit: usize) -> Result<Vec<Cafe>>;

    /// Replace an existing cafe record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the cafe doesn't exist.
    fn update_cafe(&self, cafe: &Cafe) -> Result<()>;

    /// Delete a cafe by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the cafe doesn't exist.
    fn delete_cafe(&self, cafe_id: &CafeId) -> Result<()>;

    // =========================================================================
    // Review Operations
    // =========================================================================

    /// Insert a new review record.
    ///
    /// This also maintains the cafe index.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn create_review(&self, review: &Review) -> Result<()>;

    /// Get a review by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_review(&self, review_id: &ReviewId) -> Result<Option<Review>>;

    /// List reviews for a cafe in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_reviews_by_cafe(&self, cafe_id: &CafeId) -> Result<Vec<Review>>;

    /// Replace an existing review record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the review doesn't exist.
    fn update_review(&self, review: &Review) -> Result<()>;

    /// Delete a review by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the review doesn't exist.
    fn delete_review(&self, review_id: &ReviewId) -> Result<()>;

    // =========================================================================
    // Bookmark Operations
    // =========================================================================

    /// Insert a bookmark, atomically enforcing pair uniqueness.
    ///
    /// The check against the pair index and the insert happen inside a single
    /// writer critical section, so two concurrent creations for the same
    /// (user, cafe) pair cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateBookmark` if a live bookmark already
    /// exists for this (user, cafe) pair.
    fn insert_bookmark(&self, bookmark: &Bookmark) -> Result<()>;

    /// Get a bookmark by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_bookmark(&self, bookmark_id: &BookmarkId) -> Result<Option<Bookmark>>;

    /// Delete a bookmark by ID, removing its index entries.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the bookmark doesn't exist.
    fn delete_bookmark(&self, bookmark_id: &BookmarkId) -> Result<()>;

    /// Delete the unique bookmark for a (user, cafe) pair.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no bookmark exists for the pair.
    fn delete_bookmark_by_pair(&self, user_id: &UserId, cafe_id: &CafeId) -> Result<()>;

    /// Check whether a live bookmark exists for a (user, cafe) pair.
    ///
    /// Pure read; an unknown pair yields `false` rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn bookmark_exists(&self, user_id: &UserId, cafe_id: &CafeId) -> Result<bool>;

    /// List a user's bookmarks ordered by `bookmarked_at` ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_bookmarks_by_user(&self, user_id: &UserId) -> Result<Vec<Bookmark>>;
}
