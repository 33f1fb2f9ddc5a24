//! Rating (review) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use kusina_core::types::{DbId, Timestamp};

/// A row from the `ratings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rating {
    pub id: DbId,
    pub user_id: DbId,
    pub rateable_id: DbId,
    pub rateable_type: String,
    pub rating: i16,
    pub weight: f64,
    pub comment: Option<String>,
    pub is_verified_visit: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A rating enriched with its derived vote counters, as returned by
/// review listings and mutations.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RatingWithVotes {
    pub id: DbId,
    pub user_id: DbId,
    pub rateable_id: DbId,
    pub rateable_type: String,
    pub rating: i16,
    pub weight: f64,
    pub comment: Option<String>,
    pub is_verified_visit: bool,
    pub helpful_count: i64,
    pub report_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting (or resubmitting) a review.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRating {
    pub rating: i16,
    pub comment: Option<String>,
    #[serde(default)]
    pub is_verified_visit: bool,
}

/// DTO for editing an existing review. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRating {
    pub rating: Option<i16>,
    pub comment: Option<String>,
    pub is_verified_visit: Option<bool>,
}
