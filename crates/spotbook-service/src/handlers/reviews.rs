//! Review handlers.
//!
//! Rating fields are stored as given; no aggregation happens here. Photo
//! attachments hold opaque references into an external blob store.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use spotbook_core::{Photo, Review, ReviewId};
use spotbook_store::Store;

use crate::error::ApiError;
use crate::handlers::cafes::parse_cafe_id;
use crate::state::AppState;

/// Review response.
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    /// Review ID.
    pub id: String,
    /// The reviewing user.
    pub user_id: String,
    /// The reviewed cafe.
    pub cafe_id: String,
    /// Overall rating.
    pub overall_rating: f64,
    /// Outlet accessibility rating.
    pub outlet_accessibility: f64,
    /// Wifi quality rating.
    pub wifi_quality: f64,
    /// Atmosphere description.
    pub atmosphere: Option<String>,
    /// Energy level description.
    pub energy_level: Option<String>,
    /// Study friendliness description.
    pub study_friendly: Option<String>,
    /// Attached photos.
    pub photos: Vec<PhotoResponse>,
    /// Created timestamp.
    pub created_at: String,
    /// Updated timestamp.
    pub updated_at: String,
}

/// Photo response.
#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    /// Photo ID.
    pub id: String,
    /// Opaque blob-store reference.
    pub url: String,
    /// Optional caption.
    pub caption: Option<String>,
}

impl From<&Photo> for PhotoResponse {
    fn from(photo: &Photo) -> Self {
        Self {
            id: photo.id.to_string(),
            url: photo.url.clone(),
            caption: photo.caption.clone(),
        }
    }
}

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.to_string(),
            user_id: review.user_id.to_string(),
            cafe_id: review.cafe_id.to_string(),
            overall_rating: review.overall_rating,
            outlet_accessibility: review.outlet_accessibility,
            wifi_quality: review.wifi_quality,
            atmosphere: review.atmosphere.clone(),
            energy_level: review.energy_level.clone(),
            study_friendly: review.study_friendly.clone(),
            photos: review.photos.iter().map(PhotoResponse::from).collect(),
            created_at: review.created_at.to_rfc3339(),
            updated_at: review.updated_at.to_rfc3339(),
        }
    }
}

/// Create review request.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    /// The reviewing user.
    pub user_id: String,
    /// The reviewed cafe.
    pub cafe_id: String,
    /// Overall rating, 0 to 5.
    pub overall_rating: f64,
    /// Outlet accessibility rating, 0 to 5.
    pub outlet_accessibility: f64,
    /// Wifi quality rating, 0 to 5.
    pub wifi_quality: f64,
    /// Atmosphere description.
    pub atmosphere: Option<String>,
    /// Energy level description.
    pub energy_level: Option<String>,
    /// Study friendliness description.
    pub study_friendly: Option<String>,
}

/// Update review request; only supplied fields are changed.
#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    /// New overall rating.
    pub overall_rating: Option<f64>,
    /// New outlet accessibility rating.
    pub outlet_accessibility: Option<f64>,
    /// New wifi quality rating.
    pub wifi_quality: Option<f64>,
    /// New atmosphere description.
    pub atmosphere: Option<String>,
    /// New energy level description.
    pub energy_level: Option<String>,
    /// New study friendliness description.
    pub study_friendly: Option<String>,
}

/// Photo attachment input.
#[derive(Debug, Deserialize)]
pub struct PhotoInput {
    /// Opaque blob-store reference.
    pub url: String,
    /// Optional caption.
    pub caption: Option<String>,
}

fn parse_review_id(raw: &str) -> Result<ReviewId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid review ID".into()))
}

fn check_rating(name: &str, value: f64) -> Result<(), ApiError> {
    if (0.0..=5.0).contains(&value) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "{name} must be between 0 and 5"
        )))
    }
}

/// Create a new review.
pub async fn create_review(
    State(state): State<AppState>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    let user_id = body
        .user_id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid user ID".into()))?;
    let cafe_id = parse_cafe_id(&body.cafe_id)?;

    check_rating("overall_rating", body.overall_rating)?;
    check_rating("outlet_accessibility", body.outlet_accessibility)?;
    check_rating("wifi_quality", body.wifi_quality)?;

    if state.store.get_user(&user_id)?.is_none() {
        return Err(ApiError::NotFound("User not found".into()));
    }
    if state.store.get_cafe(&cafe_id)?.is_none() {
        return Err(ApiError::NotFound("Cafe not found".into()));
    }

    let mut review = Review::new(
        user_id,
        cafe_id,
        body.overall_rating,
        body.outlet_accessibility,
        body.wifi_quality,
    );
    review.atmosphere = body.atmosphere;
    review.energy_level = body.energy_level;
    review.study_friendly = body.study_friendly;

    state.store.create_review(&review)?;

    tracing::info!(review_id = %review.id, cafe_id = %cafe_id, "Review created");

    Ok((StatusCode::CREATED, Json(ReviewResponse::from(&review))))
}

/// Get a review by ID.
pub async fn get_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let review_id = parse_review_id(&review_id)?;
    let review = state
        .store
        .get_review(&review_id)?
        .ok_or_else(|| ApiError::NotFound("Review not found".into()))?;

    Ok(Json(ReviewResponse::from(&review)))
}

/// List reviews for a cafe.
pub async fn list_cafe_reviews(
    State(state): State<AppState>,
    Path(cafe_id): Path<String>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let cafe_id = parse_cafe_id(&cafe_id)?;

    if state.store.get_cafe(&cafe_id)?.is_none() {
        return Err(ApiError::NotFound("Cafe not found".into()));
    }

    let reviews = state.store.list_reviews_by_cafe(&cafe_id)?;
    Ok(Json(reviews.iter().map(ReviewResponse::from).collect()))
}

/// Update a review, merging only the supplied fields.
pub async fn update_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    Json(body): Json<UpdateReviewRequest>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let review_id = parse_review_id(&review_id)?;
    let mut review = state
        .store
        .get_review(&review_id)?
        .ok_or_else(|| ApiError::NotFound("Review not found".into()))?;

    if let Some(overall_rating) = body.overall_rating {
        check_rating("overall_rating", overall_rating)?;
        review.overall_rating = overall_rating;
    }
    if let Some(outlet_accessibility) = body.outlet_accessibility {
        check_rating("outlet_accessibility", outlet_accessibility)?;
        review.outlet_accessibility = outlet_accessibility;
    }
    if let Some(wifi_quality) = body.wifi_quality {
        check_rating("wifi_quality", wifi_quality)?;
        review.wifi_quality = wifi_quality;
    }
    if let Some(atmosphere) = body.atmosphere {
        review.atmosphere = Some(atmosphere);
    }
    if let Some(energy_level) = body.energy_level {
        review.energy_level = Some(energy_level);
    }
    if let Some(study_friendly) = body.study_friendly {
        review.study_friendly = Some(study_friendly);
    }
    review.updated_at = chrono::Utc::now();

    state.store.update_review(&review)?;

    tracing::info!(review_id = %review.id, "Review updated");

    Ok(Json(ReviewResponse::from(&review)))
}

/// Delete a review by ID.
pub async fn delete_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let review_id = parse_review_id(&review_id)?;
    state.store.delete_review(&review_id)?;

    tracing::info!(review_id = %review_id, "Review deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Attach photo references to a review.
pub async fn add_review_photos(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    Json(body): Json<Vec<PhotoInput>>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let review_id = parse_review_id(&review_id)?;
    let mut review = state
        .store
        .get_review(&review_id)?
        .ok_or_else(|| ApiError::NotFound("Review not found".into()))?;

    if body.is_empty() {
        return Err(ApiError::BadRequest("No photos supplied".into()));
    }

    for input in body {
        if input.url.trim().is_empty() {
            return Err(ApiError::BadRequest("Photo URL must not be empty".into()));
        }
        review.photos.push(Photo::new(input.url, input.caption));
    }
    review.updated_at = chrono::Utc::now();

    state.store.update_review(&review)?;

    tracing::info!(review_id = %review.id, "Photos attached to review");

    Ok(Json(ReviewResponse::from(&review)))
}
