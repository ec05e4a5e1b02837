//! Route definitions for the account flow.

use axum::routing::post;
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// ```text
/// POST /register/     -> register
/// POST /confirm/      -> confirm
/// POST /login/        -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register/", post(account::register))
        .route("/confirm/", post(account::confirm))
        .route("/login/", post(account::login))
}
