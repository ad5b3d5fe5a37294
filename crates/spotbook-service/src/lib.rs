//! Spotbook HTTP API Service.
//!
//! This crate provides the HTTP API for the spotbook study-spot review
//! platform, including:
//!
//! - User management and plain-text login
//! - Cafe (study spot) management
//! - Reviews with photo references
//! - Bookmarks with per-(user, cafe) uniqueness and cafe-enriched listings
//!
//! The router is pure dispatch; handlers own the business rules and talk to
//! the storage layer through the `Store` trait.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers are async for the router's sake

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
