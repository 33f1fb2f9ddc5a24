//! Restaurant entity model and DTOs.
//!
//! Restaurants share the rateable-entity shape with dishes (aggregate
//! columns, popularity, featured overlay) but have no signature/panel
//! rank; those comparator keys fall back to the `Rankable` defaults.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use kusina_core::ranking::Rankable;
use kusina_core::types::{DbId, Timestamp};

/// A row from the `restaurants` table.
///
/// `cuisine_types` is a JSON array of strings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Restaurant {
    pub id: DbId,
    pub municipality_id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub cuisine_types: serde_json::Value,
    pub image_url: Option<String>,
    pub average_rating: f64,
    pub total_ratings: i32,
    pub popularity: i32,
    pub featured: bool,
    pub featured_rank: Option<i32>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Rankable for Restaurant {
    fn featured(&self) -> bool {
        self.featured
    }
    fn featured_rank(&self) -> Option<i32> {
        self.featured_rank
    }
    fn average_rating(&self) -> f64 {
        self.average_rating
    }
    fn total_ratings(&self) -> i32 {
        self.total_ratings
    }
    fn popularity(&self) -> i32 {
        self.popularity
    }
    fn name(&self) -> &str {
        &self.name
    }
}

/// DTO for creating a new restaurant.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRestaurant {
    pub municipality_id: DbId,
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    /// JSON array of strings (e.g. `["filipino", "seafood"]`).
    pub cuisine_types: Option<serde_json::Value>,
    pub image_url: Option<String>,
}

/// DTO for updating an existing restaurant. Slug and municipality are
/// immutable; curation fields have their own operations.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRestaurant {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub cuisine_types: Option<serde_json::Value>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}
