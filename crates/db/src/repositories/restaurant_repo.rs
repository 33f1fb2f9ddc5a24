//! Repository for the `restaurants` table and its curation overlay.
//!
//! Mirrors `DishRepo` minus the dish-only signature/panel rank: the same
//! scoped-fetch-then-rank listing shape and the same transactional
//! evict-then-set for featured rank assignment.

use sqlx::PgPool;

use kusina_core::ranking::{display_order, rank_top};
use kusina_core::slug::slugify;
use kusina_core::types::DbId;

use crate::models::restaurant::{CreateRestaurant, Restaurant, UpdateRestaurant};

/// Column list for the `restaurants` table.
const COLUMNS: &str = "id, municipality_id, name, slug, description, address, \
    cuisine_types, image_url, average_rating, total_ratings, popularity, featured, \
    featured_rank, is_active, created_at, updated_at";

/// Provides CRUD, ranking, and curation operations for restaurants.
pub struct RestaurantRepo;

impl RestaurantRepo {
    /// Insert a new restaurant, deriving the slug from the name when none
    /// is supplied.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRestaurant,
    ) -> Result<Restaurant, sqlx::Error> {
        let slug = input.slug.clone().unwrap_or_else(|| slugify(&input.name));

        let query = format!(
            "INSERT INTO restaurants \
                (municipality_id, name, slug, description, address, cuisine_types, image_url) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, '[]'::jsonb), $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Restaurant>(&query)
            .bind(input.municipality_id)
            .bind(&input.name)
            .bind(&slug)
            .bind(&input.description)
            .bind(&input.address)
            .bind(&input.cuisine_types)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a restaurant by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Restaurant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM restaurants WHERE id = $1");
        sqlx::query_as::<_, Restaurant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a municipality's active restaurants in display order.
    pub async fn list_ranked(
        pool: &PgPool,
        municipality_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Restaurant>, sqlx::Error> {
        let mut restaurants = Self::fetch_scoped(pool, municipality_id).await?;
        restaurants.sort_by(display_order);
        Ok(restaurants
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    /// The first `limit` restaurants of a municipality in display order.
    pub async fn top_by_municipality(
        pool: &PgPool,
        municipality_id: DbId,
        limit: i64,
    ) -> Result<Vec<Restaurant>, sqlx::Error> {
        let restaurants = Self::fetch_scoped(pool, municipality_id).await?;
        Ok(rank_top(restaurants, limit as usize))
    }

    /// Update a restaurant. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRestaurant,
    ) -> Result<Option<Restaurant>, sqlx::Error> {
        let query = format!(
            "UPDATE restaurants SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                address = COALESCE($4, address), \
                cuisine_types = COALESCE($5, cuisine_types), \
                image_url = COALESCE($6, image_url), \
                is_active = COALESCE($7, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Restaurant>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.address)
            .bind(&input.cuisine_types)
            .bind(&input.image_url)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a restaurant (set is_active = false).
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE restaurants SET is_active = false WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bump the popularity counter (backing ranking key 6).
    pub async fn increment_popularity(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE restaurants SET popularity = popularity + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Curation overlay
    // -----------------------------------------------------------------------

    /// Set or clear the featured flag. Clearing it also clears any
    /// featured rank the restaurant held.
    pub async fn set_featured(
        pool: &PgPool,
        id: DbId,
        featured: bool,
    ) -> Result<Option<Restaurant>, sqlx::Error> {
        let query = format!(
            "UPDATE restaurants SET \
                featured = $2, \
                featured_rank = CASE WHEN $2 THEN featured_rank ELSE NULL END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Restaurant>(&query)
            .bind(id)
            .bind(featured)
            .fetch_optional(pool)
            .await
    }

    /// Assign or clear a restaurant's featured rank.
    ///
    /// A non-null rank evicts the same rank from any other restaurant in
    /// the municipality and marks the target featured; both writes happen
    /// in one transaction with the target row locked. Returns `None` if
    /// the restaurant does not exist.
    pub async fn set_featured_rank(
        pool: &PgPool,
        id: DbId,
        rank: Option<i32>,
    ) -> Result<Option<Restaurant>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some((municipality_id,)) = sqlx::query_as::<_, (DbId,)>(
            "SELECT municipality_id FROM restaurants WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };

        let restaurant = match rank {
            Some(rank) => {
                sqlx::query(
                    "UPDATE restaurants SET featured_rank = NULL \
                     WHERE municipality_id = $1 AND featured_rank = $2 AND id <> $3",
                )
                .bind(municipality_id)
                .bind(rank)
                .bind(id)
                .execute(&mut *tx)
                .await?;

                let query = format!(
                    "UPDATE restaurants SET featured = true, featured_rank = $2 \
                     WHERE id = $1 \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Restaurant>(&query)
                    .bind(id)
                    .bind(rank)
                    .fetch_one(&mut *tx)
                    .await?
            }
            None => {
                let query = format!(
                    "UPDATE restaurants SET featured_rank = NULL \
                     WHERE id = $1 \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Restaurant>(&query)
                    .bind(id)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;
        Ok(Some(restaurant))
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Fetch a municipality's active restaurants with a stable base order.
    async fn fetch_scoped(
        pool: &PgPool,
        municipality_id: DbId,
    ) -> Result<Vec<Restaurant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM restaurants \
             WHERE municipality_id = $1 AND is_active = true \
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Restaurant>(&query)
            .bind(municipality_id)
            .fetch_all(pool)
            .await
    }
}
