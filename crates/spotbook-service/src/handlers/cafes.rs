//! Cafe management handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use spotbook_core::{Address, Cafe, CafeId};
use spotbook_store::Store;

use crate::error::ApiError;
use crate::handlers::users::{Pagination, SearchQuery};
use crate::state::AppState;

/// Cafe response. Also embedded in the enriched bookmark listing.
#[derive(Debug, Serialize)]
pub struct CafeResponse {
    /// Cafe ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: Address,
    /// Average rating across reviews.
    pub average_rating: f64,
    /// Contact phone number, if known.
    pub phone: Option<String>,
    /// Website URL, if known.
    pub website: Option<String>,
    /// Thumbnail image reference, if any.
    pub thumbnail_url: Option<String>,
    /// Created timestamp.
    pub created_at: String,
    /// Updated timestamp.
    pub updated_at: String,
}

impl From<&Cafe> for CafeResponse {
    fn from(cafe: &Cafe) -> Self {
        Self {
            id: cafe.id.to_string(),
            name: cafe.name.clone(),
            address: cafe.address.clone(),
            average_rating: cafe.average_rating,
            phone: cafe.phone.clone(),
            website: cafe.website.clone(),
            thumbnail_url: cafe.thumbnail_url.clone(),
            created_at: cafe.created_at.to_rfc3339(),
            updated_at: cafe.updated_at.to_rfc3339(),
        }
    }
}

/// Create cafe request.
#[derive(Debug, Deserialize)]
pub struct CreateCafeRequest {
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: Address,
    /// Initial average rating.
    #[serde(default)]
    pub average_rating: f64,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Website URL.
    pub website: Option<String>,
    /// Thumbnail image reference.
    pub thumbnail_url: Option<String>,
}

/// Update cafe request; only supplied fields are changed.
#[derive(Debug, Deserialize)]
pub struct UpdateCafeRequest {
    /// New display name.
    pub name: Option<String>,
    /// New street address.
    pub address: Option<Address>,
    /// New average rating.
    pub average_rating: Option<f64>,
    /// New phone number.
    pub phone: Option<String>,
    /// New website URL.
    pub website: Option<String>,
    /// New thumbnail reference.
    pub thumbnail_url: Option<String>,
}

/// Minimum-rating query parameters.
#[derive(Debug, Deserialize)]
pub struct MinRatingQuery {
    /// Minimum average rating, 1 to 5.
    pub min_rating: f64,
}

pub(crate) fn parse_cafe_id(raw: &str) -> Result<CafeId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid cafe ID".into()))
}

/// Create a new cafe.
pub async fn create_cafe(
    State(state): State<AppState>,
    Json(body): Json<CreateCafeRequest>,
) -> Result<(StatusCode, Json<CafeResponse>), ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Name must not be empty".into()));
    }

    let mut cafe = Cafe::new(body.name, body.address, body.average_rating);
    cafe.phone = body.phone;
    cafe.website = body.website;
    cafe.thumbnail_url = body.thumbnail_url;

    state.store.create_cafe(&cafe)?;

    tracing::info!(cafe_id = %cafe.id, name = %cafe.name, "Cafe created");

    Ok((StatusCode::CREATED, Json(CafeResponse::from(&cafe))))
}

/// List cafes in insertion order with silent range clamping.
pub async fn list_cafes(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<CafeResponse>>, ApiError> {
    let cafes = state.store.list_cafes(page.offset, page.limit)?;
    Ok(Json(cafes.iter().map(CafeResponse::from).collect()))
}

/// Search cafes by name, city, or street, case-insensitive substring.
pub async fn search_cafes(
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> Result<Json<Vec<CafeResponse>>, ApiError> {
    let needle = search.query.to_lowercase();
    let cafes = state.store.list_cafes(0, usize::MAX)?;
    let matched = cafes
        .iter()
        .filter(|cafe| {
            cafe.name.to_lowercase().contains(&needle)
                || cafe.address.city.to_lowercase().contains(&needle)
                || cafe.address.street.to_lowercase().contains(&needle)
        })
        .map(CafeResponse::from)
        .collect();
    Ok(Json(matched))
}

/// List cafes whose average rating meets the given minimum.
pub async fn list_cafes_by_rating(
    State(state): State<AppState>,
    Query(query): Query<MinRatingQuery>,
) -> Result<Json<Vec<CafeResponse>>, ApiError> {
    if !(1.0..=5.0).contains(&query.min_rating) {
        return Err(ApiError::BadRequest(
            "min_rating must be between 1 and 5".into(),
        ));
    }

    let cafes = state.store.list_cafes(0, usize::MAX)?;
    let matched = cafes
        .iter()
        .filter(|cafe| cafe.average_rating >= query.min_rating)
        .map(CafeResponse::from)
        .collect();
    Ok(Json(matched))
}

/// Get a cafe by ID.
pub async fn get_cafe(
    State(state): State<AppState>,
    Path(cafe_id): Path<String>,
) -> Result<Json<CafeResponse>, ApiError> {
    let cafe_id = parse_cafe_id(&cafe_id)?;
    let cafe = state
        .store
        .get_cafe(&cafe_id)?
        .ok_or_else(|| ApiError::NotFound("Cafe not found".into()))?;

    Ok(Json(CafeResponse::from(&cafe)))
}

/// Update a cafe, merging only the supplied fields.
pub async fn update_cafe(
    State(state): State<AppState>,
    Path(cafe_id): Path<String>,
    Json(body): Json<UpdateCafeRequest>,
) -> Result<Json<CafeResponse>, ApiError> {
    let cafe_id = parse_cafe_id(&cafe_id)?;
    let mut cafe = state
        .store
        .get_cafe(&cafe_id)?
        .ok_or_else(|| ApiError::NotFound("Cafe not found".into()))?;

    if let Some(name) = body.name {
        if name.trim().is_empty() {
            return Err(ApiError::BadRequest("Name must not be empty".into()));
        }
        cafe.name = name;
    }
    if let Some(address) = body.address {
        cafe.address = address;
    }
    if let Some(average_rating) = body.average_rating {
        cafe.average_rating = average_rating;
    }
    if let Some(phone) = body.phone {
        cafe.phone = Some(phone);
    }
    if let Some(website) = body.website {
        cafe.website = Some(website);
    }
    if let Some(thumbnail_url) = body.thumbnail_url {
        cafe.thumbnail_url = Some(thumbnail_url);
    }
    cafe.updated_at = chrono::Utc::now();

    state.store.update_cafe(&cafe)?;

    tracing::info!(cafe_id = %cafe.id, "Cafe updated");

    Ok(Json(CafeResponse::from(&cafe)))
}

/// Delete a cafe by ID.
pub async fn delete_cafe(
    State(state): State<AppState>,
    Path(cafe_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let cafe_id = parse_cafe_id(&cafe_id)?;
    state.store.delete_cafe(&cafe_id)?;

    tracing::info!(cafe_id = %cafe_id, "Cafe deleted");

    Ok(StatusCode::NO_CONTENT)
}
