//! Route definitions for review mutations.
//!
//! Review listing and submission are target-scoped and live under the
//! dish and restaurant routers; mutations address the review directly.

use axum::routing::{patch, post};
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// PATCH  /{id}      -> update own review (auth)
/// DELETE /{id}      -> delete (author or moderator/admin)
/// POST   /{id}/vote -> helpful/report vote (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", patch(review::update).delete(review::remove))
        .route("/{id}/vote", post(review::vote))
}
