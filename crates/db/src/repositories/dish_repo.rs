//! Repository for the `dishes` table, its curation overlay, and the
//! `restaurant_dishes` junction.
//!
//! Listing queries only scope and filter in SQL; display order comes from
//! the comparator in `kusina_core::ranking` so every endpoint ranks the
//! same way. Rank assignment (featured/panel) runs evict-then-set inside
//! a single transaction with the target row locked, which keeps each rank
//! slot single-occupancy per municipality under concurrent writes.

use sqlx::PgPool;

use kusina_core::ranking::{display_order, rank_top};
use kusina_core::slug::slugify;
use kusina_core::types::DbId;

use crate::models::dish::{CreateDish, Dish, UpdateDish};
use crate::models::restaurant::Restaurant;

/// Column list for the `dishes` table.
const COLUMNS: &str = "id, municipality_id, name, slug, description, flavor_profile, \
    ingredients, image_url, average_rating, total_ratings, popularity, featured, \
    featured_rank, is_signature, panel_rank, is_active, created_at, updated_at";

/// Column list for the `restaurants` table (used in JOIN queries).
const RESTAURANT_COLUMNS: &str = "r.id, r.municipality_id, r.name, r.slug, r.description, \
    r.address, r.cuisine_types, r.image_url, r.average_rating, r.total_ratings, \
    r.popularity, r.featured, r.featured_rank, r.is_active, r.created_at, r.updated_at";

/// Provides CRUD, ranking, and curation operations for dishes.
pub struct DishRepo;

impl DishRepo {
    /// Insert a new dish, deriving the slug from the name when none is
    /// supplied. Array fields default to empty JSON arrays.
    pub async fn create(pool: &PgPool, input: &CreateDish) -> Result<Dish, sqlx::Error> {
        let slug = input.slug.clone().unwrap_or_else(|| slugify(&input.name));

        let query = format!(
            "INSERT INTO dishes \
                (municipality_id, name, slug, description, flavor_profile, ingredients, image_url) \
             VALUES ($1, $2, $3, $4, COALESCE($5, '[]'::jsonb), COALESCE($6, '[]'::jsonb), $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dish>(&query)
            .bind(input.municipality_id)
            .bind(&input.name)
            .bind(&slug)
            .bind(&input.description)
            .bind(&input.flavor_profile)
            .bind(&input.ingredients)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a dish by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dish>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dishes WHERE id = $1");
        sqlx::query_as::<_, Dish>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a municipality's active dishes in display order.
    ///
    /// `offset`/`limit` are applied after the ranking pass so pages are
    /// consistent with the top-N widgets.
    pub async fn list_ranked(
        pool: &PgPool,
        municipality_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Dish>, sqlx::Error> {
        let mut dishes = Self::fetch_scoped(pool, municipality_id).await?;
        dishes.sort_by(display_order);
        Ok(dishes
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    /// The first `limit` dishes of a municipality in display order.
    pub async fn top_by_municipality(
        pool: &PgPool,
        municipality_id: DbId,
        limit: i64,
    ) -> Result<Vec<Dish>, sqlx::Error> {
        let dishes = Self::fetch_scoped(pool, municipality_id).await?;
        Ok(rank_top(dishes, limit as usize))
    }

    /// Update a dish. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDish,
    ) -> Result<Option<Dish>, sqlx::Error> {
        let query = format!(
            "UPDATE dishes SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                flavor_profile = COALESCE($4, flavor_profile), \
                ingredients = COALESCE($5, ingredients), \
                image_url = COALESCE($6, image_url), \
                is_active = COALESCE($7, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dish>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.flavor_profile)
            .bind(&input.ingredients)
            .bind(&input.image_url)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a dish (set is_active = false).
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE dishes SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bump the popularity counter (backing ranking key 6).
    pub async fn increment_popularity(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE dishes SET popularity = popularity + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Curation overlay
    // -----------------------------------------------------------------------

    /// Set or clear the featured flag. Clearing it also clears any
    /// featured rank the dish held.
    pub async fn set_featured(
        pool: &PgPool,
        id: DbId,
        featured: bool,
    ) -> Result<Option<Dish>, sqlx::Error> {
        let query = format!(
            "UPDATE dishes SET \
                featured = $2, \
                featured_rank = CASE WHEN $2 THEN featured_rank ELSE NULL END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dish>(&query)
            .bind(id)
            .bind(featured)
            .fetch_optional(pool)
            .await
    }

    /// Assign or clear a dish's featured rank.
    ///
    /// A non-null rank evicts the same rank from any other dish in the
    /// municipality and marks the target featured; both writes happen in
    /// one transaction with the target row locked. Returns `None` if the
    /// dish does not exist.
    pub async fn set_featured_rank(
        pool: &PgPool,
        id: DbId,
        rank: Option<i32>,
    ) -> Result<Option<Dish>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some((municipality_id,)) = sqlx::query_as::<_, (DbId,)>(
            "SELECT municipality_id FROM dishes WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };

        let dish = match rank {
            Some(rank) => {
                sqlx::query(
                    "UPDATE dishes SET featured_rank = NULL \
                     WHERE municipality_id = $1 AND featured_rank = $2 AND id <> $3",
                )
                .bind(municipality_id)
                .bind(rank)
                .bind(id)
                .execute(&mut *tx)
                .await?;

                let query = format!(
                    "UPDATE dishes SET featured = true, featured_rank = $2 \
                     WHERE id = $1 \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Dish>(&query)
                    .bind(id)
                    .bind(rank)
                    .fetch_one(&mut *tx)
                    .await?
            }
            None => {
                let query = format!(
                    "UPDATE dishes SET featured_rank = NULL \
                     WHERE id = $1 \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Dish>(&query)
                    .bind(id)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;
        Ok(Some(dish))
    }

    /// Set or clear the signature flag. Clearing it also clears any
    /// panel rank the dish held.
    pub async fn set_signature(
        pool: &PgPool,
        id: DbId,
        is_signature: bool,
    ) -> Result<Option<Dish>, sqlx::Error> {
        let query = format!(
            "UPDATE dishes SET \
                is_signature = $2, \
                panel_rank = CASE WHEN $2 THEN panel_rank ELSE NULL END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dish>(&query)
            .bind(id)
            .bind(is_signature)
            .fetch_optional(pool)
            .await
    }

    /// Assign or clear a dish's panel rank (the "top dishes" slot).
    ///
    /// Same single-occupancy transaction as [`Self::set_featured_rank`]:
    /// at most one dish per municipality holds a given non-null rank.
    pub async fn set_panel_rank(
        pool: &PgPool,
        id: DbId,
        rank: Option<i32>,
    ) -> Result<Option<Dish>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some((municipality_id,)) = sqlx::query_as::<_, (DbId,)>(
            "SELECT municipality_id FROM dishes WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };

        let dish = match rank {
            Some(rank) => {
                sqlx::query(
                    "UPDATE dishes SET panel_rank = NULL \
                     WHERE municipality_id = $1 AND panel_rank = $2 AND id <> $3",
                )
                .bind(municipality_id)
                .bind(rank)
                .bind(id)
                .execute(&mut *tx)
                .await?;

                let query = format!(
                    "UPDATE dishes SET is_signature = true, panel_rank = $2 \
                     WHERE id = $1 \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Dish>(&query)
                    .bind(id)
                    .bind(rank)
                    .fetch_one(&mut *tx)
                    .await?
            }
            None => {
                let query = format!(
                    "UPDATE dishes SET panel_rank = NULL \
                     WHERE id = $1 \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Dish>(&query)
                    .bind(id)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;
        Ok(Some(dish))
    }

    // -----------------------------------------------------------------------
    // Restaurant associations
    // -----------------------------------------------------------------------

    /// All active restaurants serving a dish (unsorted; callers rank).
    pub async fn restaurants_serving(
        pool: &PgPool,
        dish_id: DbId,
    ) -> Result<Vec<Restaurant>, sqlx::Error> {
        let query = format!(
            "SELECT {RESTAURANT_COLUMNS} \
             FROM restaurants r \
             JOIN restaurant_dishes rd ON rd.restaurant_id = r.id \
             WHERE rd.dish_id = $1 AND r.is_active = true \
             ORDER BY r.name"
        );
        sqlx::query_as::<_, Restaurant>(&query)
            .bind(dish_id)
            .fetch_all(pool)
            .await
    }

    /// Record that a restaurant serves a dish (idempotent).
    pub async fn link_restaurant(
        pool: &PgPool,
        dish_id: DbId,
        restaurant_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO restaurant_dishes (restaurant_id, dish_id) \
             VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(restaurant_id)
        .bind(dish_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a restaurant-dish association.
    ///
    /// Returns `true` if the association was removed.
    pub async fn unlink_restaurant(
        pool: &PgPool,
        dish_id: DbId,
        restaurant_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM restaurant_dishes \
             WHERE restaurant_id = $1 AND dish_id = $2",
        )
        .bind(restaurant_id)
        .bind(dish_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Fetch a municipality's active dishes with a stable base order.
    async fn fetch_scoped(pool: &PgPool, municipality_id: DbId) -> Result<Vec<Dish>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dishes \
             WHERE municipality_id = $1 AND is_active = true \
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Dish>(&query)
            .bind(municipality_id)
            .fetch_all(pool)
            .await
    }
}
