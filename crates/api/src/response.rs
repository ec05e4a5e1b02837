//! Response bodies shared by the account handlers.

use cinema_db::models::user::UserResponse;
use serde::Serialize;

/// `{ "message": ... }` body returned by confirm and login.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Body of a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: UserResponse,
}
