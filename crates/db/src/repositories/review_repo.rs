//! Repository for the `reviews` table.

use cinema_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{CreateReview, Review, UpdateReview};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, text, stars, movie_id, created_at, updated_at";

/// Provides CRUD operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new review, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (text, stars, movie_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(&input.text)
            .bind(input.stars)
            .bind(input.movie_id)
            .fetch_one(pool)
            .await
    }

    /// Find a review by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all reviews in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews ORDER BY id");
        sqlx::query_as::<_, Review>(&query).fetch_all(pool).await
    }

    /// Update a review. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReview,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET
                text = COALESCE($2, text),
                stars = COALESCE($3, stars),
                movie_id = COALESCE($4, movie_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(&input.text)
            .bind(input.stars)
            .bind(input.movie_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a review by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
