//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.
//! Routing is pure dispatch; each verb+path maps to exactly one handler and
//! all business rules live behind it.

use std::time::Duration;

use axum::routing::{delete, get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{bookmarks, cafes, health, reviews, users};
use crate::state::AppState;

/// Maximum concurrent requests for API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Users
/// - `POST /users/` - Create user
/// - `GET /users/` - List users (paginated)
/// - `GET /users/search/` - Search users by name
/// - `GET|PUT|DELETE /users/{user_id}` - Get/update/delete user
/// - `POST /login` - Plain-text login
///
/// ## Cafes
/// - `POST /cafes/` - Create cafe
/// - `GET /cafes/` - List cafes (paginated)
/// - `GET /cafes/search/` - Search cafes by name, city, or street
/// - `GET /cafes/by-rating/` - List cafes meeting a minimum rating
/// - `GET|PUT|DELETE /cafes/{cafe_id}` - Get/update/delete cafe
/// - `GET /cafes/{cafe_id}/reviews` - List reviews for a cafe
///
/// ## Reviews
/// - `POST /reviews/` - Create review
/// - `GET|PUT|DELETE /reviews/{review_id}` - Get/update/delete review
/// - `POST /reviews/{review_id}/photos` - Attach photo references
///
/// ## Bookmarks
/// - `POST /bookmarks/` - Create bookmark (404 missing referent, 409 duplicate pair)
/// - `GET|DELETE /bookmarks/{bookmark_id}` - Get/delete bookmark
/// - `GET /users/{user_id}/bookmarks` - Enriched listing, `bookmarked_at` ascending
/// - `DELETE /users/{user_id}/bookmarks/{cafe_id}` - Delete by pair
/// - `GET /users/{user_id}/bookmarks/{cafe_id}/exists` - Existence check
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let api_routes = Router::new()
        // Users
        .route("/users/", post(users::create_user).get(users::list_users))
        .route("/users/search/", get(users::search_users))
        .route(
            "/users/:user_id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/login", post(users::login))
        // Cafes
        .route("/cafes/", post(cafes::create_cafe).get(cafes::list_cafes))
        .route("/cafes/search/", get(cafes::search_cafes))
        .route("/cafes/by-rating/", get(cafes::list_cafes_by_rating))
        .route(
            "/cafes/:cafe_id",
            get(cafes::get_cafe)
                .put(cafes::update_cafe)
                .delete(cafes::delete_cafe),
        )
        .route("/cafes/:cafe_id/reviews", get(reviews::list_cafe_reviews))
        // Reviews
        .route("/reviews/", post(reviews::create_review))
        .route(
            "/reviews/:review_id",
            get(reviews::get_review)
                .put(reviews::update_review)
                .delete(reviews::delete_review),
        )
        .route("/reviews/:review_id/photos", post(reviews::add_review_photos))
        // Bookmarks
        .route("/bookmarks/", post(bookmarks::create_bookmark))
        .route(
            "/bookmarks/:bookmark_id",
            get(bookmarks::get_bookmark).delete(bookmarks::delete_bookmark),
        )
        .route(
            "/users/:user_id/bookmarks",
            get(bookmarks::list_user_bookmarks),
        )
        .route(
            "/users/:user_id/bookmarks/:cafe_id",
            delete(bookmarks::delete_bookmark_by_pair),
        )
        .route(
            "/users/:user_id/bookmarks/:cafe_id/exists",
            get(bookmarks::bookmark_exists),
        )
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no concurrency limit)
        .route("/health", get(health::health))
        .merge(api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
