pub mod account;
pub mod director;
pub mod health;
pub mod movie;
pub mod review;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy (paths keep their trailing slash):
///
/// ```text
/// /directors/                 list (with movies_count), create
/// /directors/{id}/            get, update, delete
///
/// /movies/                    list, create
/// /movies/reviews/            movies with nested reviews and average rating
/// /movies/{id}/               get, update, delete
///
/// /reviews/                   list, create
/// /reviews/{id}/              get, update, delete
///
/// /register/                  register (POST)
/// /confirm/                   confirm (POST)
/// /login/                     login (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(director::router())
        .merge(movie::router())
        .merge(review::router())
        .merge(account::router())
}
