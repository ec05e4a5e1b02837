//! Route definitions for the `/movies` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::movie;
use crate::state::AppState;

/// ```text
/// GET    /movies/             -> list
/// POST   /movies/             -> create
/// GET    /movies/reviews/     -> list_with_reviews
/// GET    /movies/{id}/        -> get_by_id
/// PUT    /movies/{id}/        -> update
/// DELETE /movies/{id}/        -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movies/", get(movie::list).post(movie::create))
        .route("/movies/reviews/", get(movie::list_with_reviews))
        .route(
            "/movies/{id}/",
            get(movie::get_by_id).put(movie::update).delete(movie::delete),
        )
}
