//! Core types and utilities for spotbook.
//!
//! This crate provides the foundational types used throughout the spotbook
//! platform:
//!
//! - **Identifiers**: `UserId`, `CafeId`, `BookmarkId`, `ReviewId`, `PhotoId`
//! - **Users**: `User`
//! - **Cafes**: `Cafe`, `Address`
//! - **Bookmarks**: `Bookmark`
//! - **Reviews**: `Review`, `Photo`
//!
//! # Identifiers
//!
//! All entity identifiers are ULIDs wrapped in newtypes and serialized as
//! their 26-character string form. Clients treat them as opaque strings;
//! internally their time-ordering gives the store insertion-order iteration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bookmark;
pub mod cafe;
pub mod ids;
pub mod review;
pub mod user;

pub use bookmark::Bookmark;
pub use cafe::{Address, Cafe};
pub use ids::{BookmarkId, CafeId, IdError, PhotoId, ReviewId, UserId};
pub use review::{Photo, Review};
pub use user::User;
