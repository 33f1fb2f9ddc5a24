//! Route definitions for the `/favorites` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::favorite;
use crate::state::AppState;

/// Routes mounted at `/favorites`. All require authentication.
///
/// ```text
/// GET    /                      -> list own favorites
/// PUT    /{rateable_type}/{id}  -> add (idempotent)
/// DELETE /{rateable_type}/{id}  -> remove
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(favorite::list))
        .route(
            "/{rateable_type}/{id}",
            put(favorite::add).delete(favorite::remove),
        )
}
