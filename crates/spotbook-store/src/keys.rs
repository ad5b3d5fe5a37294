//! Key encoding utilities for `RocksDB`.
//!
//! This module provides functions for encoding and decoding keys used in
//! column families. All entity IDs encode to their 16 raw ULID bytes, so
//! forward iteration over a primary column family walks records in creation
//! order.

use spotbook_core::{BookmarkId, CafeId, ReviewId, UserId};

/// Create a user key from a user ID.
#[must_use]
pub fn user_key(user_id: &UserId) -> Vec<u8> {
    user_id.to_bytes().to_vec()
}

/// Create a user-name index key.
#[must_use]
pub fn user_name_key(name: &str) -> Vec<u8> {
    name.as_bytes().to_vec()
}

/// Create a cafe key from a cafe ID.
#[must_use]
pub fn cafe_key(cafe_id: &CafeId) -> Vec<u8> {
    cafe_id.to_bytes().to_vec()
}

/// Create a review key from a review ID.
#[must_use]
pub fn review_key(review_id: &ReviewId) -> Vec<u8> {
    review_id.to_bytes().to_vec()
}

/// Create a cafe-review index key.
///
/// Format: `cafe_id (16 bytes) || review_id (16 bytes)`
#[must_use]
pub fn cafe_review_key(cafe_id: &CafeId, review_id: &ReviewId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(&cafe_id.to_bytes());
    key.extend_from_slice(&review_id.to_bytes());
    key
}

/// Create a prefix for iterating all reviews for a cafe.
#[must_use]
pub fn cafe_reviews_prefix(cafe_id: &CafeId) -> Vec<u8> {
    cafe_id.to_bytes().to_vec()
}

/// Extract the review ID from a cafe-review index key.
///
/// # Panics
///
/// Panics if the key is not at least 32 bytes.
#[must_use]
pub fn extract_review_id_from_cafe_key(key: &[u8]) -> ReviewId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[16..32]);
    ReviewId::from_bytes(bytes).expect("valid ULID bytes")
}

/// Create a bookmark key from a bookmark ID.
#[must_use]
pub fn bookmark_key(bookmark_id: &BookmarkId) -> Vec<u8> {
    bookmark_id.to_bytes().to_vec()
}

/// Create a user-bookmark index key.
///
/// Format: `user_id (16 bytes) || bookmark_id (16 bytes)`
///
/// Bookmark IDs are minted monotonically, so a prefix scan yields a user's
/// bookmarks in creation order even when several share a millisecond
/// timestamp.
#[must_use]
pub fn user_bookmark_key(user_id: &UserId, bookmark_id: &BookmarkId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(&user_id.to_bytes());
    key.extend_from_slice(&bookmark_id.to_bytes());
    key
}

/// Create a prefix for iterating all bookmarks for a user.
#[must_use]
pub fn user_bookmarks_prefix(user_id: &UserId) -> Vec<u8> {
    user_id.to_bytes().to_vec()
}

/// Extract the bookmark ID from a user-bookmark index key.
///
/// # Panics
///
/// Panics if the key is not at least 32 bytes.
#[must_use]
pub fn extract_bookmark_id_from_user_key(key: &[u8]) -> BookmarkId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[16..32]);
    BookmarkId::from_bytes(bytes).expect("valid ULID bytes")
}

/// Create a bookmark pair-uniqueness key.
///
/// Format: `user_id (16 bytes) || cafe_id (16 bytes)`
#[must_use]
pub fn bookmark_pair_key(user_id: &UserId, cafe_id: &CafeId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(&user_id.to_bytes());
    key.extend_from_slice(&cafe_id.to_bytes());
    key
}
