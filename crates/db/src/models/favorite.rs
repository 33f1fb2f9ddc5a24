//! Favorite (bookmark) entity model.

use serde::Serialize;
use sqlx::FromRow;

use kusina_core::types::{DbId, Timestamp};

/// A row from the `favorites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favorite {
    pub id: DbId,
    pub user_id: DbId,
    pub rateable_id: DbId,
    pub rateable_type: String,
    pub created_at: Timestamp,
}
