//! Handlers for the `/favorites` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use kusina_core::error::CoreError;
use kusina_core::types::{DbId, RateableKind};
use kusina_db::repositories::{DishRepo, FavoriteRepo, RestaurantRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/favorites
///
/// List the caller's favorites, newest first.
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<impl IntoResponse> {
    let favorites = FavoriteRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: favorites }))
}

/// PUT /api/v1/favorites/{rateable_type}/{id}
///
/// Bookmark a dish or restaurant (idempotent).
pub async fn add(
    State(state): State<AppState>,
    user: AuthUser,
    Path((rateable_type, id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let kind: RateableKind = rateable_type.parse().map_err(AppError::Core)?;
    ensure_target_exists(&state, kind, id).await?;

    let favorite = FavoriteRepo::add(&state.pool, user.user_id, id, kind).await?;
    Ok(Json(DataResponse { data: favorite }))
}

/// DELETE /api/v1/favorites/{rateable_type}/{id}
///
/// Remove a bookmark.
pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    Path((rateable_type, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let kind: RateableKind = rateable_type.parse().map_err(AppError::Core)?;

    let removed = FavoriteRepo::remove(&state.pool, user.user_id, id, kind).await?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Favorite",
            id,
        }))
    }
}

/// Verify a rateable target exists before bookmarking it.
async fn ensure_target_exists(state: &AppState, kind: RateableKind, id: DbId) -> AppResult<()> {
    let exists = match kind {
        RateableKind::Dish => DishRepo::find_by_id(&state.pool, id).await?.is_some(),
        RateableKind::Restaurant => RestaurantRepo::find_by_id(&state.pool, id).await?.is_some(),
    };

    if exists {
        Ok(())
    } else {
        let entity = match kind {
            RateableKind::Dish => "Dish",
            RateableKind::Restaurant => "Restaurant",
        };
        Err(AppError::Core(CoreError::NotFound { entity, id }))
    }
}
