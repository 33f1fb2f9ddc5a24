//! Handlers for reviews: submission, editing, deletion, and votes.
//!
//! Reviews are listed and submitted under the rated entity
//! (`/dishes/{id}/reviews`, `/restaurants/{id}/reviews`) and mutated by
//! review id (`/reviews/{id}`). Every mutation ends with an aggregate
//! recompute inside `RatingRepo`, so the denormalized columns on the
//! target are in sync by the time the response is built.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use kusina_core::error::CoreError;
use kusina_core::permissions::{authorize, Action};
use kusina_core::rating::validate_score;
use kusina_core::types::{DbId, RateableKind};
use kusina_db::models::rating::{SubmitRating, UpdateRating};
use kusina_db::repositories::{DishRepo, RatingRepo, RestaurantRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Accepted review vote kinds.
const VALID_VOTE_KINDS: &[&str] = &["helpful", "report"];

/// Request body for `POST /reviews/{id}/vote`.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub kind: String,
}

// ---------------------------------------------------------------------------
// Target-scoped listing and submission
// ---------------------------------------------------------------------------

/// GET /api/v1/dishes/{id}/reviews
pub async fn list_for_dish(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    list_inner(&state, RateableKind::Dish, id).await
}

/// GET /api/v1/restaurants/{id}/reviews
pub async fn list_for_restaurant(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    list_inner(&state, RateableKind::Restaurant, id).await
}

/// POST /api/v1/dishes/{id}/reviews
///
/// Submit (or resubmit) the caller's review for a dish.
pub async fn submit_for_dish(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<SubmitRating>,
) -> AppResult<impl IntoResponse> {
    submit_inner(&state, &user, RateableKind::Dish, id, input).await
}

/// POST /api/v1/restaurants/{id}/reviews
///
/// Submit (or resubmit) the caller's review for a restaurant.
pub async fn submit_for_restaurant(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<SubmitRating>,
) -> AppResult<impl IntoResponse> {
    submit_inner(&state, &user, RateableKind::Restaurant, id, input).await
}

// ---------------------------------------------------------------------------
// Review mutations by id
// ---------------------------------------------------------------------------

/// PATCH /api/v1/reviews/{id}
///
/// Edit the caller's own review (score, comment, verified-visit flag).
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRating>,
) -> AppResult<impl IntoResponse> {
    let existing = RatingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))?;

    if existing.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author may edit a review".into(),
        )));
    }

    if let Some(score) = input.rating {
        validate_score(score).map_err(AppError::Core)?;
    }

    RatingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))?;

    let review = RatingRepo::find_with_votes(&state.pool, id)
        .await?
        .expect("just updated");
    Ok(Json(DataResponse { data: review }))
}

/// DELETE /api/v1/reviews/{id}
///
/// Delete a review. Allowed for the author, moderators, and admins.
pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = RatingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))?;

    authorize(
        &user.requester(),
        Action::DeleteRating {
            author_id: existing.user_id,
        },
    )
    .map_err(AppError::Core)?;

    RatingRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/reviews/{id}/vote
///
/// Cast a helpful/report vote on a review. One vote per user per review;
/// re-voting changes the kind.
pub async fn vote(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(body): Json<VoteRequest>,
) -> AppResult<impl IntoResponse> {
    if !VALID_VOTE_KINDS.contains(&body.kind.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid vote kind '{}'. Must be one of: {}",
            body.kind,
            VALID_VOTE_KINDS.join(", ")
        ))));
    }

    RatingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))?;

    RatingRepo::vote(&state.pool, id, user.user_id, &body.kind).await?;

    let review = RatingRepo::find_with_votes(&state.pool, id)
        .await?
        .expect("verified exists");
    Ok(Json(DataResponse { data: review }))
}

// ---------------------------------------------------------------------------
// Shared implementations
// ---------------------------------------------------------------------------

async fn list_inner(
    state: &AppState,
    kind: RateableKind,
    rateable_id: DbId,
) -> AppResult<impl IntoResponse> {
    ensure_target_exists(state, kind, rateable_id).await?;

    let reviews = RatingRepo::list_for_target(&state.pool, rateable_id, kind).await?;
    Ok(Json(DataResponse { data: reviews }))
}

async fn submit_inner(
    state: &AppState,
    user: &AuthUser,
    kind: RateableKind,
    rateable_id: DbId,
    input: SubmitRating,
) -> AppResult<impl IntoResponse> {
    // Reject out-of-range scores before anything is written.
    validate_score(input.rating).map_err(AppError::Core)?;
    ensure_target_exists(state, kind, rateable_id).await?;

    let rating = RatingRepo::upsert(&state.pool, user.user_id, rateable_id, kind, &input).await?;

    let review = RatingRepo::find_with_votes(&state.pool, rating.id)
        .await?
        .expect("just upserted");
    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}

/// Verify a rateable target exists, mapping misses to 404 with the
/// entity name.
async fn ensure_target_exists(
    state: &AppState,
    kind: RateableKind,
    id: DbId,
) -> AppResult<()> {
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
