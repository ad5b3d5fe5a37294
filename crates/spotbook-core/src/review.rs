//! Review types for spotbook.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CafeId, PhotoId, ReviewId, UserId};

/// A photo attached to a review.
///
/// The URL is an opaque reference into an external blob store; this system
/// never touches the bytes behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    /// Opaque identifier assigned when the photo is attached.
    pub id: PhotoId,
    /// Opaque blob-store reference.
    pub url: String,
    /// Optional caption.
    pub caption: Option<String>,
}

impl Photo {
    /// Create a new photo reference with a fresh ID.
    #[must_use]
    pub fn new(url: String, caption: Option<String>) -> Self {
        Self {
            id: PhotoId::generate(),
            url,
            caption,
        }
    }
}

/// A user's review of a cafe.
///
/// Rating fields are plain stored values; no aggregation happens here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Opaque identifier assigned at creation.
    pub id: ReviewId,

    /// The reviewing user.
    pub user_id: UserId,

    /// The reviewed cafe.
    pub cafe_id: CafeId,

    /// Overall rating, 0 to 5.
    pub overall_rating: f64,

    /// Outlet accessibility rating, 0 to 5.
    pub outlet_accessibility: f64,

    /// Wifi quality rating, 0 to 5.
    pub wifi_quality: f64,

    /// Free-form atmosphere description.
    pub atmosphere: Option<String>,

    /// Free-form energy level description.
    pub energy_level: Option<String>,

    /// Free-form study friendliness description.
    pub study_friendly: Option<String>,

    /// Photos attached to this review.
    pub photos: Vec<Photo>,

    /// When the review was created.
    pub created_at: DateTime<Utc>,

    /// When the review was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Create a new review with a fresh ID and no photos.
    #[must_use]
    pub fn new(
        user_id: UserId,
        cafe_id: CafeId,
        overall_rating: f64,
        outlet_accessibility: f64,
        wifi_quality: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ReviewId::generate(),
            user_id,
            cafe_id,
            overall_rating,
            outlet_accessibility,
            wifi_quality,
            atmosphere: None,
            energy_level: None,
            study_friendly: None,
            photos: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
