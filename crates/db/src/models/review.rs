//! Review entity model and DTOs.

use cinema_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Rating applied when a review is created without `stars`.
pub const DEFAULT_STARS: i16 = 1;

/// A review row from the `reviews` table.
///
/// `movie_id` is exposed as `movie` on the wire.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub text: String,
    pub stars: i16,
    #[serde(rename = "movie")]
    pub movie_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new review.
#[derive(Debug, Clone)]
pub struct CreateReview {
    pub text: String,
    pub stars: i16,
    pub movie_id: DbId,
}

/// DTO for updating an existing review. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateReview {
    pub text: Option<String>,
    pub stars: Option<i16>,
    pub movie_id: Option<DbId>,
}

/// The review fields nested under a movie in the reviews view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub id: DbId,
    pub text: String,
    pub stars: i16,
}

impl From<&Review> for ReviewSummary {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id,
            text: review.text.clone(),
            stars: review.stars,
        }
    }
}
