//! Repository for the `ratings` and `review_votes` tables, and the
//! aggregate recompute that keeps the denormalized `average_rating` /
//! `total_ratings` columns on dishes and restaurants in sync.
//!
//! Every rating mutation (upsert, edit, delete) ends with
//! [`RatingRepo::recompute`] for the affected target. Concurrent
//! recomputes of the same target are last-write-wins; each one persists a
//! self-consistent snapshot and the next mutation converges the columns.

use sqlx::PgPool;

use kusina_core::rating::{aggregate, RatingAggregate, RatingSample};
use kusina_core::types::{DbId, RateableKind};

use crate::models::rating::{Rating, RatingWithVotes, SubmitRating, UpdateRating};

/// Column list for the `ratings` table.
const COLUMNS: &str = "id, user_id, rateable_id, rateable_type, rating, weight, \
    comment, is_verified_visit, created_at, updated_at";

/// Column list for rating rows enriched with vote counters. Requires the
/// `LEFT JOIN review_votes v` + `GROUP BY r.id` shape.
const VOTE_COLUMNS: &str = "r.id, r.user_id, r.rateable_id, r.rateable_type, r.rating, \
    r.weight, r.comment, r.is_verified_visit, \
    COUNT(v.id) FILTER (WHERE v.kind = 'helpful') AS helpful_count, \
    COUNT(v.id) FILTER (WHERE v.kind = 'report') AS report_count, \
    r.created_at, r.updated_at";

/// Provides rating CRUD, vote counters, and aggregate recomputation.
pub struct RatingRepo;

impl RatingRepo {
    /// Insert the caller's rating for a target, or replace their existing
    /// one (one row per author per target). New rows get weight 1.0 from
    /// the column default. Recomputes the target's aggregate before
    /// returning.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        rateable_id: DbId,
        kind: RateableKind,
        input: &SubmitRating,
    ) -> Result<Rating, sqlx::Error> {
        let query = format!(
            "INSERT INTO ratings \
                (user_id, rateable_id, rateable_type, rating, comment, is_verified_visit) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (user_id, rateable_id, rateable_type) \
             DO UPDATE SET \
                rating = EXCLUDED.rating, \
                comment = EXCLUDED.comment, \
                is_verified_visit = EXCLUDED.is_verified_visit \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Rating>(&query)
            .bind(user_id)
            .bind(rateable_id)
            .bind(kind.as_str())
            .bind(input.rating)
            .bind(&input.comment)
            .bind(input.is_verified_visit)
            .fetch_one(pool)
            .await?;

        Self::recompute(pool, rateable_id, kind).await?;
        Ok(row)
    }

    /// Find a rating by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ratings WHERE id = $1");
        sqlx::query_as::<_, Rating>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a rating by ID, enriched with vote counters.
    pub async fn find_with_votes(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RatingWithVotes>, sqlx::Error> {
        let query = format!(
            "SELECT {VOTE_COLUMNS} FROM ratings r \
             LEFT JOIN review_votes v ON v.rating_id = r.id \
             WHERE r.id = $1 \
             GROUP BY r.id"
        );
        sqlx::query_as::<_, RatingWithVotes>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all ratings for a target with vote counters, newest first.
    pub async fn list_for_target(
        pool: &PgPool,
        rateable_id: DbId,
        kind: RateableKind,
    ) -> Result<Vec<RatingWithVotes>, sqlx::Error> {
        let query = format!(
            "SELECT {VOTE_COLUMNS} FROM ratings r \
             LEFT JOIN review_votes v ON v.rating_id = r.id \
             WHERE r.rateable_id = $1 AND r.rateable_type = $2 \
             GROUP BY r.id \
             ORDER BY r.created_at DESC, r.id DESC"
        );
        sqlx::query_as::<_, RatingWithVotes>(&query)
            .bind(rateable_id)
            .bind(kind.as_str())
            .fetch_all(pool)
            .await
    }

    /// Partially update a rating (score / comment / verified flag), then
    /// recompute its target's aggregate.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRating,
    ) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!(
            "UPDATE ratings SET \
                rating = COALESCE($2, rating), \
                comment = COALESCE($3, comment), \
                is_verified_visit = COALESCE($4, is_verified_visit) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Rating>(&query)
            .bind(id)
            .bind(input.rating)
            .bind(&input.comment)
            .bind(input.is_verified_visit)
            .fetch_optional(pool)
            .await?;

        if let Some(ref rating) = row {
            if let Ok(kind) = rating.rateable_type.parse::<RateableKind>() {
                Self::recompute(pool, rating.rateable_id, kind).await?;
            }
        }
        Ok(row)
    }

    /// Delete a rating and recompute its target's aggregate.
    ///
    /// Returns `true` if a row was deleted. Permission checks (author or
    /// elevated role) happen in the caller via `kusina_core::permissions`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let deleted: Option<(DbId, String)> = sqlx::query_as(
            "DELETE FROM ratings WHERE id = $1 RETURNING rateable_id, rateable_type",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        match deleted {
            Some((rateable_id, rateable_type)) => {
                if let Ok(kind) = rateable_type.parse::<RateableKind>() {
                    Self::recompute(pool, rateable_id, kind).await?;
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Record a helpful/report vote on a rating. One vote per voter per
    /// rating; re-voting changes the kind.
    pub async fn vote(
        pool: &PgPool,
        rating_id: DbId,
        voter_id: DbId,
        kind: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO review_votes (rating_id, voter_id, kind) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (rating_id, voter_id) \
             DO UPDATE SET kind = EXCLUDED.kind",
        )
        .bind(rating_id)
        .bind(voter_id)
        .bind(kind)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Recompute and persist the denormalized aggregate for a target.
    ///
    /// Reads the target's `(rating, weight)` samples, derives the
    /// weighted aggregate via `kusina_core::rating::aggregate`, and
    /// writes both columns in one atomic UPDATE scoped by target id.
    pub async fn recompute(
        pool: &PgPool,
        rateable_id: DbId,
        kind: RateableKind,
    ) -> Result<RatingAggregate, sqlx::Error> {
        let samples: Vec<RatingSample> = sqlx::query_as(
            "SELECT rating, weight FROM ratings \
             WHERE rateable_id = $1 AND rateable_type = $2",
        )
        .bind(rateable_id)
        .bind(kind.as_str())
        .fetch_all(pool)
        .await?;

        let agg = aggregate(&samples);

        let update = format!(
            "UPDATE {} SET average_rating = $2, total_ratings = $3 WHERE id = $1",
            kind.table()
        );
        sqlx::query(&update)
            .bind(rateable_id)
            .bind(agg.average_rating)
            .bind(agg.total_ratings as i32)
            .execute(pool)
            .await?;

        Ok(agg)
    }
}
