pub mod admin;
pub mod auth;
pub mod dish;
pub mod favorite;
pub mod health;
pub mod municipality;
pub mod restaurant;
pub mod review;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                            register (public)
/// /auth/login                               login (public)
/// /auth/refresh                             refresh (public)
/// /auth/logout                              logout (requires auth)
///
/// /municipalities                           list, create
/// /municipalities/{slug}                    get by slug
/// /municipalities/{id}                      update (PUT)
/// /municipalities/{id}/dishes               ranked dish listing
/// /municipalities/{id}/dishes/top           top dishes panel
/// /municipalities/{id}/restaurants          ranked restaurant listing
/// /municipalities/{id}/restaurants/top      featured restaurants strip
///
/// /dishes                                   create (admin)
/// /dishes/{id}                              get, update, deactivate
/// /dishes/{id}/view                         popularity bump (POST)
/// /dishes/{id}/reviews                      list, submit
/// /dishes/{id}/restaurants                  serving restaurants, link
/// /dishes/{id}/restaurants/{restaurant_id}  unlink (DELETE)
///
/// /restaurants                              create (admin)
/// /restaurants/{id}                         get, update, deactivate
/// /restaurants/{id}/view                    popularity bump (POST)
/// /restaurants/{id}/reviews                 list, submit
///
/// /reviews/{id}                             edit, delete
/// /reviews/{id}/vote                        helpful/report vote (POST)
///
/// /favorites                                list own (auth)
/// /favorites/{rateable_type}/{id}           add, remove (auth)
///
/// /admin/dishes/{id}                        curation fields (PATCH)
/// /admin/restaurants/{id}                   curation fields (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login, refresh, logout).
        .nest("/auth", auth::router())
        // Municipality directory and scoped ranked listings.
        .nest("/municipalities", municipality::router())
        // Dish CRUD, reviews, and restaurant associations.
        .nest("/dishes", dish::router())
        // Restaurant CRUD and reviews.
        .nest("/restaurants", restaurant::router())
        // Review mutations and votes.
        .nest("/reviews", review::router())
        // User favorites.
        .nest("/favorites", favorite::router())
        // Curation panel (admin/owner only).
        .nest("/admin", admin::router())
}
