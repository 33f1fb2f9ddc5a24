//! Handlers for the `/restaurants` resource and municipality-scoped
//! restaurant listings.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use kusina_core::error::CoreError;
use kusina_core::listing::{
    clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, DEFAULT_TOP_RESTAURANTS, MAX_LIST_LIMIT,
    MAX_TOP_LIMIT,
};
use kusina_core::slug::validate_slug;
use kusina_core::types::DbId;
use kusina_db::models::restaurant::{CreateRestaurant, UpdateRestaurant};
use kusina_db::repositories::{MunicipalityRepo, RestaurantRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{PaginationParams, TopParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Municipality-scoped listings
// ---------------------------------------------------------------------------

/// GET /api/v1/municipalities/{id}/restaurants?limit=&offset=
///
/// A municipality's active restaurants in display order.
pub async fn list_by_municipality(
    State(state): State<AppState>,
    Path(municipality_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    ensure_municipality_exists(&state, municipality_id).await?;

    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);
    let restaurants =
        RestaurantRepo::list_ranked(&state.pool, municipality_id, limit, offset).await?;
    Ok(Json(DataResponse { data: restaurants }))
}

/// GET /api/v1/municipalities/{id}/restaurants/top?limit=
///
/// The municipality's featured restaurants strip (default 3 entries).
pub async fn top_by_municipality(
    State(state): State<AppState>,
    Path(municipality_id): Path<DbId>,
    Query(params): Query<TopParams>,
) -> AppResult<impl IntoResponse> {
    ensure_municipality_exists(&state, municipality_id).await?;

    let limit = clamp_limit(params.limit, DEFAULT_TOP_RESTAURANTS, MAX_TOP_LIMIT);
    let restaurants =
        RestaurantRepo::top_by_municipality(&state.pool, municipality_id, limit).await?;
    Ok(Json(DataResponse { data: restaurants }))
}

// ---------------------------------------------------------------------------
// Restaurant CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/restaurants
///
/// Create a new restaurant (admin only).
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateRestaurant>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref slug) = input.slug {
        validate_slug(slug).map_err(AppError::Core)?;
    }
    ensure_municipality_exists(&state, input.municipality_id).await?;

    let restaurant = RestaurantRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: restaurant })))
}

/// GET /api/v1/restaurants/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let restaurant = RestaurantRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Restaurant",
            id,
        }))?;
    Ok(Json(DataResponse { data: restaurant }))
}

/// PUT /api/v1/restaurants/{id}
///
/// Update a restaurant's details (admin only). Curation fields are
/// managed via the `/admin` routes.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRestaurant>,
) -> AppResult<impl IntoResponse> {
    let restaurant = RestaurantRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Restaurant",
            id,
        }))?;
    Ok(Json(DataResponse { data: restaurant }))
}

/// DELETE /api/v1/restaurants/{id}
///
/// Deactivate a restaurant (soft-disable, not delete). Admin only.
pub async fn deactivate(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = RestaurantRepo::deactivate(&state.pool, id).await?;
    if deactivated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Restaurant",
            id,
        }))
    }
}

/// POST /api/v1/restaurants/{id}/view
///
/// Record a detail-page view (bumps the popularity counter).
pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let bumped = RestaurantRepo::increment_popularity(&state.pool, id).await?;
    if bumped {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Restaurant",
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
