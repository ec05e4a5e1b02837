//! In-memory [`CatalogStore`].
//!
//! Intended for local development without PostgreSQL and for tests. All
//! tables live behind one `RwLock`; every operation holds the lock for its
//! whole read-modify-write, which makes each call atomic. Referential and
//! uniqueness checks mirror the SQL schema and report the same constraint
//! names.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use cinema_core::types::DbId;

use crate::error::StoreError;
use crate::models::director::{CreateDirector, Director, DirectorWithMovieCount, UpdateDirector};
use crate::models::movie::{CreateMovie, Movie, MovieWithReviews, UpdateMovie};
use crate::models::review::{CreateReview, Review, UpdateReview};
use crate::models::user::{CreateUser, User, UQ_CONFIRMATION_CODE, UQ_EMAIL, UQ_USERNAME};

use super::{movies_with_reviews, CatalogQueries, CatalogStore, Repository, UserStore};

/// Foreign key from `movies.director_id` to `directors.id`.
const FK_MOVIE_DIRECTOR: &str = "fk_movies_director_id";

/// Foreign key from `reviews.movie_id` to `movies.id`.
const FK_REVIEW_MOVIE: &str = "fk_reviews_movie_id";

/// Per-table id sequences, mirroring BIGSERIAL (first id is 1, never reused).
#[derive(Debug, Default)]
struct Sequences {
    directors: DbId,
    movies: DbId,
    reviews: DbId,
    users: DbId,
}

fn next(seq: &mut DbId) -> DbId {
    *seq += 1;
    *seq
}

#[derive(Debug, Default)]
struct Tables {
    seq: Sequences,
    directors: BTreeMap<DbId, Director>,
    movies: BTreeMap<DbId, Movie>,
    reviews: BTreeMap<DbId, Review>,
    users: BTreeMap<DbId, User>,
}

impl Tables {
    fn require_director(&self, id: DbId) -> Result<(), StoreError> {
        if self.directors.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::ForeignKeyViolation {
                constraint: FK_MOVIE_DIRECTOR.to_string(),
            })
        }
    }

    fn require_movie(&self, id: DbId) -> Result<(), StoreError> {
        if self.movies.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::ForeignKeyViolation {
                constraint: FK_REVIEW_MOVIE.to_string(),
            })
        }
    }

    /// Remove a movie's reviews, then the movie itself.
    fn delete_movie_cascade(&mut self, id: DbId) -> bool {
        if !self.movies.contains_key(&id) {
            return false;
        }
        self.reviews.retain(|_, review| review.movie_id != id);
        self.movies.remove(&id).is_some()
    }
}

/// Store keeping every table in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl Repository<Director> for MemoryStore {
    async fn create(&self, input: &CreateDirector) -> Result<Director, StoreError> {
        let mut tables = self.write()?;
        let now = Utc::now();
        let director = Director {
            id: next(&mut tables.seq.directors),
            name: input.name.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.directors.insert(director.id, director.clone());
        Ok(director)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Director>, StoreError> {
        Ok(self.read()?.directors.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Director>, StoreError> {
        Ok(self.read()?.directors.values().cloned().collect())
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateDirector,
    ) -> Result<Option<Director>, StoreError> {
        let mut tables = self.write()?;
        let Some(director) = tables.directors.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            director.name = name.clone();
        }
        director.updated_at = Utc::now();
        Ok(Some(director.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.write()?;
        if !tables.directors.contains_key(&id) {
            return Ok(false);
        }
        let movie_ids: Vec<DbId> = tables
            .movies
            .values()
            .filter(|movie| movie.director_id == id)
            .map(|movie| movie.id)
            .collect();
        for movie_id in movie_ids {
            tables.delete_movie_cascade(movie_id);
        }
        Ok(tables.directors.remove(&id).is_some())
    }
}

#[async_trait]
impl Repository<Movie> for MemoryStore {
    async fn create(&self, input: &CreateMovie) -> Result<Movie, StoreError> {
        let mut tables = self.write()?;
        tables.require_director(input.director_id)?;
        let now = Utc::now();
        let movie = Movie {
            id: next(&mut tables.seq.movies),
            title: input.title.clone(),
            description: input.description.clone(),
            duration: input.duration,
            director_id: input.director_id,
            created_at: now,
            updated_at: now,
        };
        tables.movies.insert(movie.id, movie.clone());
        Ok(movie)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, StoreError> {
        Ok(self.read()?.movies.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Movie>, StoreError> {
        Ok(self.read()?.movies.values().cloned().collect())
    }

    async fn update(&self, id: DbId, input: &UpdateMovie) -> Result<Option<Movie>, StoreError> {
        let mut tables = self.write()?;
        if !tables.movies.contains_key(&id) {
            return Ok(None);
        }
        if let Some(director_id) = input.director_id {
            tables.require_director(director_id)?;
        }
        let Some(movie) = tables.movies.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = &input.title {
            movie.title = title.clone();
        }
        if let Some(description) = &input.description {
            movie.description = description.clone();
        }
        if let Some(duration) = input.duration {
            movie.duration = duration;
        }
        if let Some(director_id) = input.director_id {
            movie.director_id = director_id;
        }
        movie.updated_at = Utc::now();
        Ok(Some(movie.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.write()?.delete_movie_cascade(id))
    }
}

#[async_trait]
impl Repository<Review> for MemoryStore {
    async fn create(&self, input: &CreateReview) -> Result<Review, StoreError> {
        let mut tables = self.write()?;
        tables.require_movie(input.movie_id)?;
        let now = Utc::now();
        let review = Review {
            id: next(&mut tables.seq.reviews),
            text: input.text.clone(),
            stars: input.stars,
            movie_id: input.movie_id,
            created_at: now,
            updated_at: now,
        };
        tables.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Review>, StoreError> {
        Ok(self.read()?.reviews.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Review>, StoreError> {
        Ok(self.read()?.reviews.values().cloned().collect())
    }

    async fn update(&self, id: DbId, input: &UpdateReview) -> Result<Option<Review>, StoreError> {
        let mut tables = self.write()?;
        if !tables.reviews.contains_key(&id) {
            return Ok(None);
        }
        if let Some(movie_id) = input.movie_id {
            tables.require_movie(movie_id)?;
        }
        let Some(review) = tables.reviews.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(text) = &input.text {
            review.text = text.clone();
        }
        if let Some(stars) = input.stars {
            review.stars = stars;
        }
        if let Some(movie_id) = input.movie_id {
            review.movie_id = movie_id;
        }
        review.updated_at = Utc::now();
        Ok(Some(review.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.write()?.reviews.remove(&id).is_some())
    }
}

#[async_trait]
impl CatalogQueries for MemoryStore {
    async fn list_directors_with_movie_count(
        &self,
    ) -> Result<Vec<DirectorWithMovieCount>, StoreError> {
        let tables = self.read()?;
        let mut counts: HashMap<DbId, i64> = HashMap::new();
        for movie in tables.movies.values() {
            *counts.entry(movie.director_id).or_default() += 1;
        }
        Ok(tables
            .directors
            .values()
            .map(|director| DirectorWithMovieCount {
                id: director.id,
                name: director.name.clone(),
                movies_count: counts.get(&director.id).copied().unwrap_or(0),
            })
            .collect())
    }

    async fn list_movies_with_reviews(&self) -> Result<Vec<MovieWithReviews>, StoreError> {
        let tables = self.read()?;
        Ok(movies_with_reviews(tables.movies.values(), tables.reviews.values()))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        let mut tables = self.write()?;
        for user in tables.users.values() {
            let clash = if user.username == input.username {
                Some(UQ_USERNAME)
            } else if user.email == input.email {
                Some(UQ_EMAIL)
            } else if user.confirmation_code.as_deref() == Some(input.confirmation_code.as_str())
            {
                Some(UQ_CONFIRMATION_CODE)
            } else {
                None
            };
            if let Some(constraint) = clash {
                return Err(StoreError::UniqueViolation {
                    constraint: constraint.to_string(),
                });
            }
        }
        let now = Utc::now();
        let user = User {
            id: next(&mut tables.seq.users),
            username: input.username.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            is_active: false,
            confirmation_code: Some(input.confirmation_code.clone()),
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn confirm_user(&self, code: &str) -> Result<Option<User>, StoreError> {
        let mut tables = self.write()?;
        let Some(user) = tables
            .users
            .values_mut()
            .find(|user| user.confirmation_code.as_deref() == Some(code))
        else {
            return Ok(None);
        };
        user.is_active = true;
        user.confirmation_code = None;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }
}
