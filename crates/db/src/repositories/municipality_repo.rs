//! Repository for the `municipalities` table.

use sqlx::PgPool;

use kusina_core::slug::slugify;
use kusina_core::types::DbId;

use crate::models::municipality::{CreateMunicipality, Municipality, UpdateMunicipality};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, province, description, created_at, updated_at";

/// Provides CRUD operations for municipalities.
pub struct MunicipalityRepo;

impl MunicipalityRepo {
    /// Insert a new municipality, deriving the slug from the name when
    /// none is supplied.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMunicipality,
    ) -> Result<Municipality, sqlx::Error> {
        let slug = input
            .slug
            .clone()
            .unwrap_or_else(|| slugify(&input.name));

        let query = format!(
            "INSERT INTO municipalities (name, slug, province, description) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Municipality>(&query)
            .bind(&input.name)
            .bind(&slug)
            .bind(&input.province)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a municipality by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Municipality>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM municipalities WHERE id = $1");
        sqlx::query_as::<_, Municipality>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a municipality by its URL slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Municipality>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM municipalities WHERE slug = $1");
        sqlx::query_as::<_, Municipality>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List all municipalities alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Municipality>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM municipalities ORDER BY name");
        sqlx::query_as::<_, Municipality>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a municipality. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMunicipality,
    ) -> Result<Option<Municipality>, sqlx::Error> {
        let query = format!(
            "UPDATE municipalities SET \
                name = COALESCE($2, name), \
                province = COALESCE($3, province), \
                description = COALESCE($4, description) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Municipality>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.province)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }
}
