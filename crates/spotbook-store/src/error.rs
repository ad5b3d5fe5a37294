//! Error types for spotbook storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The entity kind that was looked up.
        entity: &'static str,
        /// The identifier that did not resolve.
        id: String,
    },

    /// A live bookmark already exists for this (user, cafe) pair.
    #[error("bookmark already exists for user {user_id} and cafe {cafe_id}")]
    DuplicateBookmark {
        /// The user holding the existing bookmark.
        user_id: String,
        /// The cafe already bookmarked.
        cafe_id: String,
    },

    /// A user with this name already exists.
    #[error("user name already taken: {name}")]
    DuplicateName {
        /// The conflicting name.
        name: String,
    },
}
