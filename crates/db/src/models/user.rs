//! User entity model and DTOs.

use cinema_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Unique constraint on `users.username`.
pub const UQ_USERNAME: &str = "uq_users_username";

/// Unique constraint on `users.email`.
pub const UQ_EMAIL: &str = "uq_users_email";

/// Partial unique index on pending `users.confirmation_code` values.
pub const UQ_CONFIRMATION_CODE: &str = "uq_users_confirmation_code";

/// Full user row from the `users` table.
///
/// Contains the password hash and the pending confirmation code -- NEVER
/// serialize this to API responses directly. Use [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    /// Set at registration, cleared once the account is confirmed.
    pub confirmation_code: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub is_active: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            is_active: user.is_active,
        }
    }
}

/// DTO for inserting a freshly registered (inactive) user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub confirmation_code: String,
}
