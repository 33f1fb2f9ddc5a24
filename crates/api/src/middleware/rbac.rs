//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and runs the corresponding
//! `kusina_core::permissions` check, so route handlers state their
//! authorization requirement at the type level and the role logic stays
//! in one place.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use kusina_core::permissions::{authorize, Action};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role (directory management). Rejects with 403
/// Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        authorize(&user.requester(), Action::ManageDirectory).map_err(AppError::Core)?;
        Ok(RequireAdmin(user))
    }
}

/// Requires `admin` or `owner` role (curation overlay writes). Rejects
/// with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn curators_only(RequireCurator(user): RequireCurator) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireCurator(pub AuthUser);

impl FromRequestParts<AppState> for RequireCurator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        authorize(&user.requester(), Action::CurateEntity).map_err(AppError::Core)?;
        Ok(RequireCurator(user))
    }
}
