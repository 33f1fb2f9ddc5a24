//! Dish entity model and DTOs.
//!
//! Dishes carry the full curation overlay: the shared `featured` /
//! `featured_rank` pair plus the dish-only `is_signature` / `panel_rank`
//! pair used for the municipal "top dishes" panel. The `average_rating`
//! and `total_ratings` columns are denormalized aggregates owned by
//! `RatingRepo::recompute`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use kusina_core::ranking::Rankable;
use kusina_core::types::{DbId, Timestamp};

/// A row from the `dishes` table.
///
/// `flavor_profile` and `ingredients` are JSON arrays of strings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dish {
    pub id: DbId,
    pub municipality_id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub flavor_profile: serde_json::Value,
    pub ingredients: serde_json::Value,
    pub image_url: Option<String>,
    pub average_rating: f64,
    pub total_ratings: i32,
    pub popularity: i32,
    pub featured: bool,
    pub featured_rank: Option<i32>,
    pub is_signature: bool,
    pub panel_rank: Option<i32>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Rankable for Dish {
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
    fn panel_rank(&self) -> Option<i32> {
        self.panel_rank
    }
    fn is_signature(&self) -> bool {
        self.is_signature
    }
}

/// DTO for creating a new dish. When `slug` is omitted it is derived
/// from `name`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDish {
    pub municipality_id: DbId,
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    /// JSON array of strings (e.g. `["sour", "savory"]`).
    pub flavor_profile: Option<serde_json::Value>,
    /// JSON array of strings.
    pub ingredients: Option<serde_json::Value>,
    pub image_url: Option<String>,
}

/// DTO for updating an existing dish. Slug and municipality are immutable;
/// curation fields have their own operations.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDish {
    pub name: Option<String>,
    pub description: Option<String>,
    pub flavor_profile: Option<serde_json::Value>,
    pub ingredients: Option<serde_json::Value>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}
