//! Municipality entity model and DTOs.
//!
//! Municipalities scope every directory listing and ranking query; each
//! dish and restaurant belongs to exactly one.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use kusina_core::types::{DbId, Timestamp};

/// A row from the `municipalities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Municipality {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub province: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new municipality. When `slug` is omitted it is
/// derived from `name`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMunicipality {
    pub name: String,
    pub slug: Option<String>,
    pub province: Option<String>,
    pub description: Option<String>,
}

/// DTO for updating an existing municipality. Slug is immutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMunicipality {
    pub name: Option<String>,
    pub province: Option<String>,
    pub description: Option<String>,
}
