//! Bookmark handlers.
//!
//! These handlers own the bookmark business rules: referent existence checks
//! before creation, pair uniqueness surfaced as a conflict, and the enriched
//! per-user listing that joins each bookmark with its cafe record.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use spotbook_core::{Bookmark, BookmarkId, UserId};
use spotbook_store::Store;

use crate::error::ApiError;
use crate::handlers::cafes::{parse_cafe_id, CafeResponse};
use crate::state::AppState;

/// Bookmark response.
#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    /// Bookmark ID.
    pub id: String,
    /// The bookmarking user.
    pub user_id: String,
    /// The bookmarked cafe.
    pub cafe_id: String,
    /// Creation timestamp (RFC 3339, UTC).
    pub bookmarked_at: String,
}

impl From<&Bookmark> for BookmarkResponse {
    fn from(bookmark: &Bookmark) -> Self {
        Self {
            id: bookmark.id.to_string(),
            user_id: bookmark.user_id.to_string(),
            cafe_id: bookmark.cafe_id.to_string(),
            bookmarked_at: bookmark.bookmarked_at.to_rfc3339(),
        }
    }
}

/// Bookmark with its cafe joined in, for the per-user listing.
///
/// Entries whose cafe no longer resolves are omitted from the listing, so
/// `cafe` is always present here.
#[derive(Debug, Serialize)]
pub struct BookmarkWithCafeResponse {
    /// Bookmark ID.
    pub id: String,
    /// The bookmarking user.
    pub user_id: String,
    /// The bookmarked cafe.
    pub cafe_id: String,
    /// Creation timestamp (RFC 3339, UTC).
    pub bookmarked_at: String,
    /// The full cafe record.
    pub cafe: CafeResponse,
}

/// Create bookmark request.
#[derive(Debug, Deserialize)]
pub struct CreateBookmarkRequest {
    /// The bookmarking user.
    pub user_id: String,
    /// The cafe to bookmark.
    pub cafe_id: String,
}

/// Existence check response.
#[derive(Debug, Serialize)]
pub struct BookmarkExistsResponse {
    /// Whether a live bookmark exists for the pair.
    pub exists: bool,
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid user ID".into()))
}

fn parse_bookmark_id(raw: &str) -> Result<BookmarkId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid bookmark ID".into()))
}

/// Create a bookmark for a (user, cafe) pair.
///
/// Both referents must exist, and a duplicate pair is a conflict rather than
/// a silent success; callers wanting idempotence check the exists endpoint
/// first.
pub async fn create_bookmark(
    State(state): State<AppState>,
    Json(body): Json<CreateBookmarkRequest>,
) -> Result<(StatusCode, Json<BookmarkResponse>), ApiError> {
    let user_id = parse_user_id(&body.user_id)?;
    let cafe_id = parse_cafe_id(&body.cafe_id)?;

    if state.store.get_user(&user_id)?.is_none() {
        return Err(ApiError::NotFound("User not found".into()));
    }
    if state.store.get_cafe(&cafe_id)?.is_none() {
        return Err(ApiError::NotFound("Cafe not found".into()));
    }

    let bookmark = Bookmark::new(user_id, cafe_id);
    state.store.insert_bookmark(&bookmark)?;

    tracing::info!(
        bookmark_id = %bookmark.id,
        user_id = %user_id,
        cafe_id = %cafe_id,
        "Bookmark created"
    );

    Ok((StatusCode::CREATED, Json(BookmarkResponse::from(&bookmark))))
}

/// Get a bookmark by ID.
pub async fn get_bookmark(
    State(state): State<AppState>,
    Path(bookmark_id): Path<String>,
) -> Result<Json<BookmarkResponse>, ApiError> {
    let bookmark_id = parse_bookmark_id(&bookmark_id)?;
    let bookmark = state
        .store
        .get_bookmark(&bookmark_id)?
        .ok_or_else(|| ApiError::NotFound("Bookmark not found".into()))?;

    Ok(Json(BookmarkResponse::from(&bookmark)))
}

/// List a user's bookmarks with cafe detail, ordered by `bookmarked_at`
/// ascending.
///
/// A bookmark whose cafe has since been deleted is skipped; one stale
/// reference never fails the listing, and no placeholder cafe is fabricated.
pub async fn list_user_bookmarks(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<BookmarkWithCafeResponse>>, ApiError> {
    let user_id = parse_user_id(&user_id)?;

    if state.store.get_user(&user_id)?.is_none() {
        return Err(ApiError::NotFound("User not found".into()));
    }

    let bookmarks = state.store.list_bookmarks_by_user(&user_id)?;

    let mut enriched = Vec::with_capacity(bookmarks.len());
    for bookmark in &bookmarks {
        match state.store.get_cafe(&bookmark.cafe_id)? {
            Some(cafe) => enriched.push(BookmarkWithCafeResponse {
                id: bookmark.id.to_string(),
                user_id: bookmark.user_id.to_string(),
                cafe_id: bookmark.cafe_id.to_string(),
                bookmarked_at: bookmark.bookmarked_at.to_rfc3339(),
                cafe: CafeResponse::from(&cafe),
            }),
            None => {
                tracing::debug!(
                    bookmark_id = %bookmark.id,
                    cafe_id = %bookmark.cafe_id,
                    "Skipping bookmark with dangling cafe reference"
                );
            }
        }
    }

    Ok(Json(enriched))
}

/// Delete a bookmark by ID.
pub async fn delete_bookmark(
    State(state): State<AppState>,
    Path(bookmark_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let bookmark_id = parse_bookmark_id(&bookmark_id)?;
    state.store.delete_bookmark(&bookmark_id)?;

    tracing::info!(bookmark_id = %bookmark_id, "Bookmark deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Delete the unique bookmark for a (user, cafe) pair.
pub async fn delete_bookmark_by_pair(
    State(state): State<AppState>,
    Path((user_id, cafe_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let cafe_id = parse_cafe_id(&cafe_id)?;

    state.store.delete_bookmark_by_pair(&user_id, &cafe_id)?;

    tracing::info!(user_id = %user_id, cafe_id = %cafe_id, "Bookmark deleted by pair");

    Ok(StatusCode::NO_CONTENT)
}

/// Check whether a bookmark exists for a (user, cafe) pair.
///
/// Pure read; an unknown pair (including an unknown user or cafe) yields
/// `false` rather than an error.
pub async fn bookmark_exists(
    State(state): State<AppState>,
    Path((user_id, cafe_id)): Path<(String, String)>,
) -> Result<Json<BookmarkExistsResponse>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let cafe_id = parse_cafe_id(&cafe_id)?;

    let exists = state.store.bookmark_exists(&user_id, &cafe_id)?;

    Ok(Json(BookmarkExistsResponse { exists }))
}
