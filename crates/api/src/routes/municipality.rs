//! Route definitions for municipalities and their scoped listings.

use axum::routing::get;
use axum::Router;

use crate::handlers::{dish, municipality, restaurant};
use crate::state::AppState;

/// Routes mounted at `/municipalities`.
///
/// The `{id}` segment doubles as the slug on the single-entity GET; both
/// kinds of key are extracted positionally by the handlers.
///
/// ```text
/// GET    /                     -> list
/// POST   /                     -> create (admin)
/// GET    /{slug}               -> get_by_slug
/// PUT    /{id}                 -> update (admin)
/// GET    /{id}/dishes          -> ranked dish listing
/// GET    /{id}/dishes/top      -> top dishes panel
/// GET    /{id}/restaurants     -> ranked restaurant listing
/// GET    /{id}/restaurants/top -> featured restaurants strip
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(municipality::list).post(municipality::create),
        )
        .route(
            "/{id}",
            get(municipality::get_by_slug).put(municipality::update),
        )
        .route("/{id}/dishes", get(dish::list_by_municipality))
        .route("/{id}/dishes/top", get(dish::top_by_municipality))
        .route("/{id}/restaurants", get(restaurant::list_by_municipality))
        .route(
            "/{id}/restaurants/top",
            get(restaurant::top_by_municipality),
        )
}
