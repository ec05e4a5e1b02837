//! PostgreSQL-backed [`CatalogStore`], delegating to the repositories.

use async_trait::async_trait;
use cinema_core::types::DbId;

use crate::error::StoreError;
use crate::models::director::{CreateDirector, Director, DirectorWithMovieCount, UpdateDirector};
use crate::models::movie::{CreateMovie, Movie, MovieWithReviews, UpdateMovie};
use crate::models::review::{CreateReview, Review, UpdateReview};
use crate::models::user::{CreateUser, User};
use crate::repositories::{DirectorRepo, MovieRepo, ReviewRepo, UserRepo};
use crate::DbPool;

use super::{movies_with_reviews, CatalogQueries, CatalogStore, Repository, UserStore};

/// Store backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Repository<Director> for PgStore {
    async fn create(&self, input: &CreateDirector) -> Result<Director, StoreError> {
        Ok(DirectorRepo::create(&self.pool, input).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Director>, StoreError> {
        Ok(DirectorRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list(&self) -> Result<Vec<Director>, StoreError> {
        Ok(DirectorRepo::list(&self.pool).await?)
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateDirector,
    ) -> Result<Option<Director>, StoreError> {
        Ok(DirectorRepo::update(&self.pool, id, input).await?)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(DirectorRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl Repository<Movie> for PgStore {
    async fn create(&self, input: &CreateMovie) -> Result<Movie, StoreError> {
        Ok(MovieRepo::create(&self.pool, input).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, StoreError> {
        Ok(MovieRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list(&self) -> Result<Vec<Movie>, StoreError> {
        Ok(MovieRepo::list(&self.pool).await?)
    }

    async fn update(&self, id: DbId, input: &UpdateMovie) -> Result<Option<Movie>, StoreError> {
        Ok(MovieRepo::update(&self.pool, id, input).await?)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(MovieRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl Repository<Review> for PgStore {
    async fn create(&self, input: &CreateReview) -> Result<Review, StoreError> {
        Ok(ReviewRepo::create(&self.pool, input).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Review>, StoreError> {
        Ok(ReviewRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list(&self) -> Result<Vec<Review>, StoreError> {
        Ok(ReviewRepo::list(&self.pool).await?)
    }

    async fn update(&self, id: DbId, input: &UpdateReview) -> Result<Option<Review>, StoreError> {
        Ok(ReviewRepo::update(&self.pool, id, input).await?)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ReviewRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl CatalogQueries for PgStore {
    async fn list_directors_with_movie_count(
        &self,
    ) -> Result<Vec<DirectorWithMovieCount>, StoreError> {
        Ok(DirectorRepo::list_with_movie_count(&self.pool).await?)
    }

    async fn list_movies_with_reviews(&self) -> Result<Vec<MovieWithReviews>, StoreError> {
        let movies = MovieRepo::list(&self.pool).await?;
        let reviews = ReviewRepo::list(&self.pool).await?;
        // Averaged over the fetched reviews so it matches the nested list.
        Ok(movies_with_reviews(&movies, &reviews))
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn confirm_user(&self, code: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::confirm(&self.pool, code).await?)
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
