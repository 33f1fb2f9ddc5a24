//! Handlers for the `/admin` curation panel.
//!
//! All handlers require the admin or owner role via [`RequireCurator`].
//! Rank fields distinguish "absent" (leave unchanged) from "null" (clear
//! the rank) with a double-`Option`: the outer layer is whether the key
//! appeared in the request body, the inner one is the JSON value.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Deserializer};

use kusina_core::error::CoreError;
use kusina_core::types::DbId;
use kusina_db::models::dish::Dish;
use kusina_db::models::restaurant::Restaurant;
use kusina_db::repositories::{DishRepo, RestaurantRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireCurator;
use crate::response::DataResponse;
use crate::state::AppState;

/// Deserialize a present-but-possibly-null field into `Some(Option<T>)`.
fn nullable_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Request body for `PATCH /admin/dishes/{id}`.
///
/// Every field is optional; only the supplied ones are applied, in the
/// order declared here.
#[derive(Debug, Default, Deserialize)]
pub struct CurateDishRequest {
    pub featured: Option<bool>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub featured_rank: Option<Option<i32>>,
    pub is_signature: Option<bool>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub panel_rank: Option<Option<i32>>,
}

/// Request body for `PATCH /admin/restaurants/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct CurateRestaurantRequest {
    pub featured: Option<bool>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub featured_rank: Option<Option<i32>>,
}

/// Positive-rank guard shared by both curation endpoints.
fn validate_rank(rank: Option<i32>) -> Result<(), CoreError> {
    match rank {
        Some(rank) if rank < 1 => Err(CoreError::Validation(format!(
            "Rank must be a positive integer, got {rank}"
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// PATCH /api/v1/admin/dishes/{id}
///
/// Assign or clear a dish's curation overlay fields. Rank assignment
/// evicts the previous holder of the slot within the municipality.
pub async fn curate_dish(
    State(state): State<AppState>,
    RequireCurator(_curator): RequireCurator,
    Path(id): Path<DbId>,
    Json(input): Json<CurateDishRequest>,
) -> AppResult<impl IntoResponse> {
    if let Some(rank) = input.featured_rank {
        validate_rank(rank).map_err(AppError::Core)?;
    }
    if let Some(rank) = input.panel_rank {
        validate_rank(rank).map_err(AppError::Core)?;
    }

    let not_found = || AppError::Core(CoreError::NotFound { entity: "Dish", id });

    if let Some(featured) = input.featured {
        DishRepo::set_featured(&state.pool, id, featured)
            .await?
            .ok_or_else(not_found)?;
    }
    if let Some(rank) = input.featured_rank {
        DishRepo::set_featured_rank(&state.pool, id, rank)
            .await?
            .ok_or_else(not_found)?;
    }
    if let Some(is_signature) = input.is_signature {
        DishRepo::set_signature(&state.pool, id, is_signature)
            .await?
            .ok_or_else(not_found)?;
    }
    if let Some(rank) = input.panel_rank {
        DishRepo::set_panel_rank(&state.pool, id, rank)
            .await?
            .ok_or_else(not_found)?;
    }

    let dish: Dish = DishRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(DataResponse { data: dish }))
}

/// PATCH /api/v1/admin/restaurants/{id}
///
/// Assign or clear a restaurant's curation overlay fields.
pub async fn curate_restaurant(
    State(state): State<AppState>,
    RequireCurator(_curator): RequireCurator,
    Path(id): Path<DbId>,
    Json(input): Json<CurateRestaurantRequest>,
) -> AppResult<impl IntoResponse> {
    if let Some(rank) = input.featured_rank {
        validate_rank(rank).map_err(AppError::Core)?;
    }

    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Restaurant",
            id,
        })
    };

    if let Some(featured) = input.featured {
        RestaurantRepo::set_featured(&state.pool, id, featured)
            .await?
            .ok_or_else(not_found)?;
    }
    if let Some(rank) = input.featured_rank {
        RestaurantRepo::set_featured_rank(&state.pool, id, rank)
            .await?
            .ok_or_else(not_found)?;
    }

    let restaurant: Restaurant = RestaurantRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(DataResponse { data: restaurant }))
}
