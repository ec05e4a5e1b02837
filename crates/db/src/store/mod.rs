//! Store abstraction used by the HTTP handlers.
//!
//! [`Repository`] is the CRUD contract, parameterized over the entity type.
//! [`CatalogStore`] bundles the three catalogue repositories with the
//! aggregate views and the user queries, so handlers hold a single
//! `Arc<dyn CatalogStore>` regardless of backend.
//!
//! Every mutating method is atomic: it either applies fully or not at all.
//! Deletes cascade to owned children (director -> movies -> reviews).

pub mod memory;
pub mod postgres;

use std::collections::HashMap;

use async_trait::async_trait;
use cinema_core::types::DbId;

use crate::error::StoreError;
use crate::models::director::{CreateDirector, Director, DirectorWithMovieCount, UpdateDirector};
use crate::models::movie::{CreateMovie, Movie, MovieWithReviews, UpdateMovie};
use crate::models::review::{CreateReview, Review, ReviewSummary, UpdateReview};
use crate::models::user::{CreateUser, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// A persisted catalogue entity and the DTOs that create and patch it.
pub trait Entity: Send + Sync + 'static {
    type Create: Send + Sync;
    type Update: Send + Sync;

    /// Human-readable entity name used in error messages.
    const NAME: &'static str;
}

impl Entity for Director {
    type Create = CreateDirector;
    type Update = UpdateDirector;
    const NAME: &'static str = "Director";
}

impl Entity for Movie {
    type Create = CreateMovie;
    type Update = UpdateMovie;
    const NAME: &'static str = "Movie";
}

impl Entity for Review {
    type Create = CreateReview;
    type Update = UpdateReview;
    const NAME: &'static str = "Review";
}

/// CRUD access to one entity type.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Insert a new row. Fails with [`StoreError::ForeignKeyViolation`] when
    /// a referenced parent does not exist.
    async fn create(&self, input: &E::Create) -> Result<E, StoreError>;

    /// `None` when no row has this id.
    async fn find_by_id(&self, id: DbId) -> Result<Option<E>, StoreError>;

    /// All rows ordered by id.
    async fn list(&self) -> Result<Vec<E>, StoreError>;

    /// Apply the `Some` fields of `input`. `None` when no row has this id.
    async fn update(&self, id: DbId, input: &E::Update) -> Result<Option<E>, StoreError>;

    /// Remove the row and everything it owns. `false` when no row has this id.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;
}

/// Aggregate read views over the catalogue.
#[async_trait]
pub trait CatalogQueries: Send + Sync {
    /// Every director with its number of movies (0 when it has none).
    async fn list_directors_with_movie_count(
        &self,
    ) -> Result<Vec<DirectorWithMovieCount>, StoreError>;

    /// Every movie with its reviews and the mean of their stars
    /// (`None` when it has none).
    async fn list_movies_with_reviews(&self) -> Result<Vec<MovieWithReviews>, StoreError>;
}

/// Registration and activation queries.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert an inactive user. Fails with [`StoreError::UniqueViolation`]
    /// naming the clashing constraint.
    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Activate the user holding `code` and clear the code.
    ///
    /// `None` when no user holds it; no row is modified in that case.
    async fn confirm_user(&self, code: &str) -> Result<Option<User>, StoreError>;
}

/// Everything the HTTP layer needs from persistence.
#[async_trait]
pub trait CatalogStore:
    Repository<Director> + Repository<Movie> + Repository<Review> + CatalogQueries + UserStore
{
    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;

    /// Confirm the backend can serve requests.
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Nest each review under its movie and average the nested stars.
///
/// Reviews whose movie is not in `movies` are dropped, so every
/// `average_rating` is computed from exactly the reviews listed beside it.
pub(crate) fn movies_with_reviews<'a>(
    movies: impl IntoIterator<Item = &'a Movie>,
    reviews: impl IntoIterator<Item = &'a Review>,
) -> Vec<MovieWithReviews> {
    let mut by_movie: HashMap<DbId, Vec<ReviewSummary>> = HashMap::new();
    for review in reviews {
        by_movie
            .entry(review.movie_id)
            .or_default()
            .push(ReviewSummary::from(review));
    }

    movies
        .into_iter()
        .map(|movie| {
            let reviews = by_movie.remove(&movie.id).unwrap_or_default();
            let stars: Vec<i16> = reviews.iter().map(|review| review.stars).collect();
            MovieWithReviews {
                id: movie.id,
                title: movie.title.clone(),
                average_rating: average_stars(&stars),
                reviews,
            }
        })
        .collect()
}

/// Mean of a set of star ratings, `None` for an empty set.
fn average_stars(stars: &[i16]) -> Option<f64> {
    if stars.is_empty() {
        return None;
    }
    let total: i64 = stars.iter().copied().map(i64::from).sum();
    Some(total as f64 / stars.len() as f64)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn average_of_no_reviews_is_none() {
        assert_eq!(average_stars(&[]), None);
    }

    #[test]
    fn average_of_five_three_four_is_four() {
        assert_eq!(average_stars(&[5, 3, 4]), Some(4.0));
    }

    #[test]
    fn average_keeps_fraction() {
        assert_eq!(average_stars(&[5, 4]), Some(4.5));
    }

    fn movie(id: DbId, title: &str) -> Movie {
        let now = Utc::now();
        Movie {
            id,
            title: title.to_string(),
            description: String::new(),
            duration: 100,
            director_id: 1,
            created_at: now,
            updated_at: now,
        }
    }

    fn review(id: DbId, movie_id: DbId, stars: i16) -> Review {
        let now = Utc::now();
        Review {
            id,
            text: format!("{stars} stars"),
            stars,
            movie_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn average_matches_nested_reviews() {
        let movies = [movie(1, "Memento"), movie(2, "Tenet")];
        let reviews = [review(1, 1, 5), review(2, 1, 3), review(3, 1, 4)];

        let view = movies_with_reviews(&movies, &reviews);

        assert_eq!(view.len(), 2);
        assert_eq!(view[0].reviews.len(), 3);
        assert_eq!(view[0].average_rating, Some(4.0));
        assert!(view[1].reviews.is_empty());
        assert_eq!(view[1].average_rating, None);
    }

    /// A review fetched for a movie that was not fetched (inserted or
    /// re-parented between the two reads) must not leak into any rating.
    #[test]
    fn reviews_of_unlisted_movies_are_ignored() {
        let movies = [movie(1, "Memento")];
        let reviews = [review(1, 1, 5), review(2, 99, 1)];

        let view = movies_with_reviews(&movies, &reviews);

        assert_eq!(view.len(), 1);
        assert_eq!(view[0].reviews.len(), 1);
        assert_eq!(view[0].average_rating, Some(5.0));
    }
}
