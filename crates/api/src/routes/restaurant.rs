//! Route definitions for restaurants and their reviews.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{restaurant, review};
use crate::state::AppState;

/// Routes mounted at `/restaurants`.
///
/// ```text
/// POST   /              -> create (admin)
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update (admin)
/// DELETE /{id}          -> deactivate (admin)
/// POST   /{id}/view     -> record_view
/// GET    /{id}/reviews  -> list reviews
/// POST   /{id}/reviews  -> submit review (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(restaurant::create))
        .route(
            "/{id}",
            get(restaurant::get_by_id)
                .put(restaurant::update)
                .delete(restaurant::deactivate),
        )
        .route("/{id}/view", post(restaurant::record_view))
        .route(
            "/{id}/reviews",
            get(review::list_for_restaurant).post(review::submit_for_restaurant),
        )
}
