//! Route definitions for dishes, their reviews, and the restaurants
//! serving them.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{dish, review};
use crate::state::AppState;

/// Routes mounted at `/dishes`.
///
/// ```text
/// POST   /                              -> create (admin)
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update (admin)
/// DELETE /{id}                          -> deactivate (admin)
/// POST   /{id}/view                     -> record_view
/// GET    /{id}/reviews                  -> list reviews
/// POST   /{id}/reviews                  -> submit review (auth)
/// GET    /{id}/restaurants              -> restaurants serving, ranked
/// POST   /{id}/restaurants              -> link restaurant (admin)
/// DELETE /{id}/restaurants/{restaurant_id} -> unlink (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(dish::create))
        .route(
            "/{id}",
            get(dish::get_by_id).put(dish::update).delete(dish::deactivate),
        )
        .route("/{id}/view", post(dish::record_view))
        .route(
            "/{id}/reviews",
            get(review::list_for_dish).post(review::submit_for_dish),
        )
        .route(
            "/{id}/restaurants",
            get(dish::restaurants_serving).post(dish::link_restaurant),
        )
        .route(
            "/{id}/restaurants/{restaurant_id}",
            delete(dish::unlink_restaurant),
        )
}
