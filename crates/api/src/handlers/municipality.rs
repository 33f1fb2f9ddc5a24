//! Handlers for the `/municipalities` resource.
//!
//! Municipality-scoped dish and restaurant listings live in the `dish`
//! and `restaurant` handler modules; this module covers the directory of
//! municipalities itself.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use kusina_core::error::CoreError;
use kusina_core::slug::validate_slug;
use kusina_core::types::DbId;
use kusina_db::models::municipality::{CreateMunicipality, UpdateMunicipality};
use kusina_db::repositories::MunicipalityRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/municipalities
///
/// List all municipalities alphabetically.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let municipalities = MunicipalityRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: municipalities,
    }))
}

/// POST /api/v1/municipalities
///
/// Create a new municipality (admin only).
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateMunicipality>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref slug) = input.slug {
        validate_slug(slug).map_err(AppError::Core)?;
    }
    let municipality = MunicipalityRepo::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: municipality }),
    ))
}

/// GET /api/v1/municipalities/{slug}
///
/// Get a single municipality by its URL slug.
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let municipality = MunicipalityRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Municipality with slug '{slug}' not found")))?;
    Ok(Json(DataResponse { data: municipality }))
}

/// PUT /api/v1/municipalities/{id}
///
/// Update a municipality's details (admin only). Slug is immutable.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMunicipality>,
) -> AppResult<impl IntoResponse> {
    let municipality = MunicipalityRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Municipality",
            id,
        }))?;
    Ok(Json(DataResponse { data: municipality }))
}
