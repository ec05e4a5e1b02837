//! Route definitions for the `/reviews` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// ```text
/// GET    /reviews/            -> list
/// POST   /reviews/            -> create
/// GET    /reviews/{id}/       -> get_by_id
/// PUT    /reviews/{id}/       -> update
/// DELETE /reviews/{id}/       -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reviews/", get(review::list).post(review::create))
        .route(
            "/reviews/{id}/",
            get(review::get_by_id)
                .put(review::update)
                .delete(review::delete),
        )
}
