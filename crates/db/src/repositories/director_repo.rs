//! Repository for the `directors` table.

use cinema_core::types::DbId;
use sqlx::PgPool;

use crate::models::director::{CreateDirector, Director, DirectorWithMovieCount, UpdateDirector};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for directors.
pub struct DirectorRepo;

impl DirectorRepo {
    /// Insert a new director, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDirector) -> Result<Director, sqlx::Error> {
        let query = format!(
            "INSERT INTO directors (name)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Director>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a director by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Director>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM directors WHERE id = $1");
        sqlx::query_as::<_, Director>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all directors in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Director>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM directors ORDER BY id");
        sqlx::query_as::<_, Director>(&query).fetch_all(pool).await
    }

    /// List all directors with the number of movies each one owns.
    pub async fn list_with_movie_count(
        pool: &PgPool,
    ) -> Result<Vec<DirectorWithMovieCount>, sqlx::Error> {
        sqlx::query_as::<_, DirectorWithMovieCount>(
            "SELECT d.id, d.name, COUNT(m.id)::BIGINT AS movies_count
             FROM directors d
             LEFT JOIN movies m ON m.director_id = d.id
             GROUP BY d.id, d.name
             ORDER BY d.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a director. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDirector,
    ) -> Result<Option<Director>, sqlx::Error> {
        let query = format!(
            "UPDATE directors SET
                name = COALESCE($2, name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Director>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a director together with its movies and their reviews.
    ///
    /// The director row is locked first so no movie can be attached to it
    /// while its children are removed. Returns `true` if the director existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM directors WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            "DELETE FROM reviews
             WHERE movie_id IN (SELECT id FROM movies WHERE director_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM movies WHERE director_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM directors WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
