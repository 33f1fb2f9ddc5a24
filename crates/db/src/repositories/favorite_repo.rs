//! Repository for the `favorites` table.

use sqlx::PgPool;

use kusina_core::types::{DbId, RateableKind};

use crate::models::favorite::Favorite;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, rateable_id, rateable_type, created_at";

/// Provides bookmark operations for users.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Add a favorite (idempotent). Returns the row, existing or new.
    pub async fn add(
        pool: &PgPool,
        user_id: DbId,
        rateable_id: DbId,
        kind: RateableKind,
    ) -> Result<Favorite, sqlx::Error> {
        let insert = format!(
            "INSERT INTO favorites (user_id, rateable_id, rateable_type) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, rateable_id, rateable_type) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Favorite>(&insert)
            .bind(user_id)
            .bind(rateable_id)
            .bind(kind.as_str())
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(favorite) => Ok(favorite),
            // Conflict path: the favorite already existed.
            None => {
                let select = format!(
                    "SELECT {COLUMNS} FROM favorites \
                     WHERE user_id = $1 AND rateable_id = $2 AND rateable_type = $3"
                );
                sqlx::query_as::<_, Favorite>(&select)
                    .bind(user_id)
                    .bind(rateable_id)
                    .bind(kind.as_str())
                    .fetch_one(pool)
                    .await
            }
        }
    }

    /// Remove a favorite. Returns `true` if a row was deleted.
    pub async fn remove(
        pool: &PgPool,
        user_id: DbId,
        rateable_id: DbId,
        kind: RateableKind,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM favorites \
             WHERE user_id = $1 AND rateable_id = $2 AND rateable_type = $3",
        )
        .bind(user_id)
        .bind(rateable_id)
        .bind(kind.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a user's favorites, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Favorite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM favorites \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
