//! Handlers for the `/dishes` resource and municipality-scoped dish
//! listings.
//!
//! Listing endpoints return display order: curation overlay first, then
//! the computed aggregate keys (see `kusina_core::ranking`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use kusina_core::error::CoreError;
use kusina_core::listing::{
    clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, DEFAULT_TOP_DISHES, MAX_LIST_LIMIT,
    MAX_TOP_LIMIT,
};
use kusina_core::ranking::rank_top;
use kusina_core::slug::validate_slug;
use kusina_core::types::DbId;
use kusina_db::models::dish::{CreateDish, UpdateDish};
use kusina_db::repositories::{DishRepo, MunicipalityRepo, RestaurantRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{PaginationParams, TopParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for linking a restaurant to a dish.
#[derive(Debug, Deserialize)]
pub struct LinkRestaurantRequest {
    pub restaurant_id: DbId,
}

// ---------------------------------------------------------------------------
// Municipality-scoped listings
// ---------------------------------------------------------------------------

/// GET /api/v1/municipalities/{id}/dishes?limit=&offset=
///
/// A municipality's active dishes in display order.
pub async fn list_by_municipality(
    State(state): State<AppState>,
    Path(municipality_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    ensure_municipality_exists(&state, municipality_id).await?;

    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);
    let dishes = DishRepo::list_ranked(&state.pool, municipality_id, limit, offset).await?;
    Ok(Json(DataResponse { data: dishes }))
}

/// GET /api/v1/municipalities/{id}/dishes/top?limit=
///
/// The municipality's "top dishes" panel (default 5 entries).
pub async fn top_by_municipality(
    State(state): State<AppState>,
    Path(municipality_id): Path<DbId>,
    Query(params): Query<TopParams>,
) -> AppResult<impl IntoResponse> {
    ensure_municipality_exists(&state, municipality_id).await?;

    let limit = clamp_limit(params.limit, DEFAULT_TOP_DISHES, MAX_TOP_LIMIT);
    let dishes = DishRepo::top_by_municipality(&state.pool, municipality_id, limit).await?;
    Ok(Json(DataResponse { data: dishes }))
}

// ---------------------------------------------------------------------------
// Dish CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/dishes
///
/// Create a new dish (admin only).
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateDish>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref slug) = input.slug {
        validate_slug(slug).map_err(AppError::Core)?;
    }
    ensure_municipality_exists(&state, input.municipality_id).await?;

    let dish = DishRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: dish })))
}

/// GET /api/v1/dishes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let dish = DishRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Dish", id }))?;
    Ok(Json(DataResponse { data: dish }))
}

/// PUT /api/v1/dishes/{id}
///
/// Update a dish's details (admin only). Curation fields are managed via
/// the `/admin` routes.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDish>,
) -> AppResult<impl IntoResponse> {
    let dish = DishRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Dish", id }))?;
    Ok(Json(DataResponse { data: dish }))
}

/// DELETE /api/v1/dishes/{id}
///
/// Deactivate a dish (soft-disable, not delete). Admin only.
pub async fn deactivate(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = DishRepo::deactivate(&state.pool, id).await?;
    if deactivated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Dish", id }))
    }
}

/// POST /api/v1/dishes/{id}/view
///
/// Record a detail-page view (bumps the popularity counter).
pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let bumped = DishRepo::increment_popularity(&state.pool, id).await?;
    if bumped {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Dish", id }))
    }
}

// ---------------------------------------------------------------------------
// Restaurant associations
// ---------------------------------------------------------------------------

/// GET /api/v1/dishes/{id}/restaurants
///
/// Restaurants serving this dish, in display order.
pub async fn restaurants_serving(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_dish_exists(&state, id).await?;

    let restaurants = DishRepo::restaurants_serving(&state.pool, id).await?;
    let ranked = rank_top(restaurants, DEFAULT_LIST_LIMIT as usize);
    Ok(Json(DataResponse { data: ranked }))
}

/// POST /api/v1/dishes/{id}/restaurants
///
/// Record that a restaurant serves this dish (admin only, idempotent).
pub async fn link_restaurant(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(body): Json<LinkRestaurantRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_dish_exists(&state, id).await?;
    RestaurantRepo::find_by_id(&state.pool, body.restaurant_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Restaurant",
            id: body.restaurant_id,
        }))?;

    DishRepo::link_restaurant(&state.pool, id, body.restaurant_id).await?;

    let restaurants = DishRepo::restaurants_serving(&state.pool, id).await?;
    let ranked = rank_top(restaurants, DEFAULT_LIST_LIMIT as usize);
    Ok(Json(DataResponse { data: ranked }))
}

/// DELETE /api/v1/dishes/{id}/restaurants/{restaurant_id}
///
/// Remove a restaurant-dish association (admin only).
pub async fn unlink_restaurant(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((id, restaurant_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let removed = DishRepo::unlink_restaurant(&state.pool, id, restaurant_id).await?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "RestaurantDish",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_municipality_exists(state: &AppState, id: DbId) -> AppResult<()> {
    MunicipalityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Municipality",
            id,
        }))?;
    Ok(())
}

async fn ensure_dish_exists(state: &AppState, id: DbId) -> AppResult<()> {
    DishRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Dish", id }))?;
    Ok(())
}
