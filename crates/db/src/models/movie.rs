//! Movie entity model and DTOs.

use cinema_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::review::ReviewSummary;

/// A movie row from the `movies` table.
///
/// `director_id` is exposed as `director` on the wire.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub description: String,
    /// Running time in minutes.
    pub duration: i32,
    #[serde(rename = "director")]
    pub director_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new movie.
#[derive(Debug, Clone)]
pub struct CreateMovie {
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub director_id: DbId,
}

/// DTO for updating an existing movie. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateMovie {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub director_id: Option<DbId>,
}

/// A movie with its reviews and their average rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieWithReviews {
    pub id: DbId,
    pub title: String,
    pub reviews: Vec<ReviewSummary>,
    pub average_rating: Option<f64>,
}
