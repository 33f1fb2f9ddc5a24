//! Route definitions for the `/admin` curation panel.

use axum::routing::patch;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. All require the admin or owner role.
///
/// ```text
/// PATCH /dishes/{id}      -> curation fields (featured/panel ranks)
/// PATCH /restaurants/{id} -> curation fields (featured rank)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dishes/{id}", patch(admin::curate_dish))
        .route("/restaurants/{id}", patch(admin::curate_restaurant))
}
