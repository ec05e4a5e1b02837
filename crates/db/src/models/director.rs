//! Director entity model and DTOs.

use cinema_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A director row from the `directors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Director {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new director.
#[derive(Debug, Clone)]
pub struct CreateDirector {
    pub name: String,
}

/// DTO for updating an existing director. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateDirector {
    pub name: Option<String>,
}

/// A director annotated with the number of movies it owns.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct DirectorWithMovieCount {
    pub id: DbId,
    pub name: String,
    pub movies_count: i64,
}
