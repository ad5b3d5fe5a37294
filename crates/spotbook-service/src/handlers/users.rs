//! User management handlers.
//!
//! Passwords are stored and compared as plain text, mirroring the original
//! system's explicit design choice. This is a known, accepted risk; responses
//! never include the field.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use spotbook_core::{User, UserId};
use spotbook_store::Store;

use crate::error::ApiError;
use crate::state::AppState;

/// Default page size for listings.
const DEFAULT_PAGE_LIMIT: usize = 100;

/// Pagination query parameters. Out-of-range values clamp silently.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    /// Number of records to skip.
    #[serde(default)]
    pub offset: usize,
    /// Maximum number of records to return.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

const fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

/// Text search query parameters. Matching is case-insensitive substring.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Text to match.
    pub query: String,
}

/// User response (password omitted).
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: String,
    /// Unique display name.
    pub name: String,
    /// Number of cafes visited.
    pub cafes_visited: u32,
    /// Average rating across reviews.
    pub average_rating: f64,
    /// Profile picture reference, if set.
    pub profile_picture: Option<String>,
    /// Created timestamp.
    pub created_at: String,
    /// Updated timestamp.
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            cafes_visited: user.cafes_visited,
            average_rating: user.average_rating,
            profile_picture: user.profile_picture.clone(),
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// Create user request.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Unique display name.
    pub name: String,
    /// Plain-text password.
    pub password: String,
}

/// Update user request; only supplied fields are changed.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    /// New display name.
    pub name: Option<String>,
    /// New password.
    pub password: Option<String>,
    /// New cafes-visited count.
    pub cafes_visited: Option<u32>,
    /// New average rating.
    pub average_rating: Option<f64>,
    /// New profile picture reference.
    pub profile_picture: Option<String>,
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Display name.
    pub name: String,
    /// Plain-text password.
    pub password: String,
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Confirmation message.
    pub message: String,
    /// The authenticated user's ID.
    pub user_id: String,
    /// The authenticated user's name.
    pub user_name: String,
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid user ID".into()))
}

/// Create a new user.
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Name must not be empty".into()));
    }
    if body.password.is_empty() {
        return Err(ApiError::BadRequest("Password must not be empty".into()));
    }

    let user = User::new(body.name, body.password);
    state.store.create_user(&user)?;

    tracing::info!(user_id = %user.id, name = %user.name, "User created");

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// List users in insertion order with silent range clamping.
pub async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.store.list_users(page.offset, page.limit)?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// Search users by name, case-insensitive substring.
pub async fn search_users(
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let needle = search.query.to_lowercase();
    let users = state.store.list_users(0, usize::MAX)?;
    let matched = users
        .iter()
        .filter(|user| user.name.to_lowercase().contains(&needle))
        .map(UserResponse::from)
        .collect();
    Ok(Json(matched))
}

/// Get a user by ID.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let user = state
        .store
        .get_user(&user_id)?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(UserResponse::from(&user)))
}

/// Update a user, merging only the supplied fields.
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let mut user = state
        .store
        .get_user(&user_id)?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    if let Some(name) = body.name {
        if name.trim().is_empty() {
            return Err(ApiError::BadRequest("Name must not be empty".into()));
        }
        user.name = name;
    }
    if let Some(password) = body.password {
        user.password = password;
    }
    if let Some(cafes_visited) = body.cafes_visited {
        user.cafes_visited = cafes_visited;
    }
    if let Some(average_rating) = body.average_rating {
        user.average_rating = average_rating;
    }
    if let Some(profile_picture) = body.profile_picture {
        user.profile_picture = Some(profile_picture);
    }
    user.updated_at = chrono::Utc::now();

    state.store.update_user(&user)?;

    tracing::info!(user_id = %user.id, "User updated");

    Ok(Json(UserResponse::from(&user)))
}

/// Delete a user by ID.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    state.store.delete_user(&user_id)?;

    tracing::info!(user_id = %user_id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Log in with name and password.
///
/// Comparison is verbatim plain text, per the original system's design.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .store
        .get_user_by_name(&body.name)?
        .ok_or(ApiError::Unauthorized)?;

    if user.password != body.password {
        tracing::warn!(name = %body.name, "Login failed");
        return Err(ApiError::Unauthorized);
    }

    tracing::info!(user_id = %user.id, "Login successful");

    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        user_id: user.id.to_string(),
        user_name: user.name,
    }))
}
