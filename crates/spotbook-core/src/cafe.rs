//! Cafe (study spot) types for spotbook.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CafeId;

/// A street address for a cafe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    /// Street line.
    pub street: String,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
}

/// A study spot that users can review and bookmark.
///
/// Cafes are read-only from the bookmark subsystem's perspective; no bookmark
/// operation mutates a cafe record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cafe {
    /// Opaque identifier assigned at creation.
    pub id: CafeId,

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

    /// Opaque reference to a thumbnail image, if any.
    pub thumbnail_url: Option<String>,

    /// When the cafe was created.
    pub created_at: DateTime<Utc>,

    /// When the cafe was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Cafe {
    /// Create a new cafe with a fresh ID.
    #[must_use]
    pub fn new(name: String, address: Address, average_rating: f64) -> Self {
        let now = Utc::now();
        Self {
            id: CafeId::generate(),
            name,
            address,
            average_rating,
            phone: None,
            website: None,
            thumbnail_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}
