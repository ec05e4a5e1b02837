//! Handlers for registration, confirmation and login.
//!
//! A user moves from registered-inactive to active by presenting the
//! six-digit code issued at registration. Login only checks credentials; it
//! issues no session or token.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cinema_core::confirmation::generate_confirmation_code;
use cinema_core::validation::account::{registration_errors, validate_confirmation_code};
use cinema_db::models::user::{CreateUser, User, UserResponse, UQ_CONFIRMATION_CODE};
use cinema_db::CatalogStore;
use serde::Deserialize;

use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::trim_in_place;
use crate::response::{MessageResponse, RegisterResponse};
use crate::state::AppState;

/// Attempts at drawing a confirmation code no pending user holds.
const MAX_CODE_ATTEMPTS: usize = 5;

const USERNAME_TAKEN: &str = "A user with that username already exists.";
const EMAIL_TAKEN: &str = "A user with that email already exists.";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /register/`. Missing fields read as empty and are
/// reported by validation.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /confirm/`.
#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    #[serde(default)]
    pub confirmation_code: String,
}

/// Request body for `POST /login/`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/register/
///
/// Create an inactive user and issue its confirmation code.
pub async fn register(
    State(state): State<AppState>,
    AppJson(mut input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    trim_in_place(&mut input.username);
    trim_in_place(&mut input.email);

    let mut errors = registration_errors(&input.username, &input.email);
    if let Err(message) = validate_password_strength(&input.password, MIN_PASSWORD_LENGTH) {
        errors.add("password", message);
    }
    if !errors.contains("username")
        && state
            .store
            .find_user_by_username(&input.username)
            .await?
            .is_some()
    {
        errors.add("username", USERNAME_TAKEN);
    }
    if !errors.contains("email") && state.store.find_user_by_email(&input.email).await?.is_some() {
        errors.add("email", EMAIL_TAKEN);
    }
    errors.into_result()?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = create_with_fresh_code(
        state.store.as_ref(),
        input.username,
        input.email,
        password_hash,
    )
    .await?;
    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully. Check your email for the confirmation code.",
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/v1/confirm/
///
/// Activate the user holding the code. The code is single-use.
pub async fn confirm(
    State(state): State<AppState>,
    AppJson(mut input): AppJson<ConfirmRequest>,
) -> AppResult<Json<MessageResponse>> {
    trim_in_place(&mut input.confirmation_code);
    validate_confirmation_code(&input.confirmation_code)?;

    let user = state
        .store
        .confirm_user(&input.confirmation_code)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid confirmation code.".into()))?;
    tracing::info!(user_id = user.id, "User confirmed");

    Ok(Json(MessageResponse::new("User confirmed successfully.")))
}

/// POST /api/v1/login/
///
/// Check the credentials of an active user.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<MessageResponse>> {
    let username = input.username.trim();
    if username.is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required.".into(),
        ));
    }

    let user = state
        .store
        .find_user_by_username(username)
        .await?
        .ok_or_else(|| AppError::BadRequest("User not found.".into()))?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !valid {
        return Err(AppError::BadRequest("Invalid credentials.".into()));
    }

    if !user.is_active {
        return Err(AppError::BadRequest("User not confirmed yet.".into()));
    }

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(MessageResponse::new("Login successful.")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Insert the user, drawing a new code whenever the previous one is already
/// held by another pending user.
async fn create_with_fresh_code(
    store: &dyn CatalogStore,
    username: String,
    email: String,
    password_hash: String,
) -> AppResult<User> {
    let mut input = CreateUser {
        username,
        email,
        password_hash,
        confirmation_code: generate_confirmation_code(),
    };

    for attempt in 1..=MAX_CODE_ATTEMPTS {
        match store.create_user(&input).await {
            Ok(user) => {
                // Email delivery is not wired up; the log is the only channel.
                tracing::debug!(
                    user_id = user.id,
                    code = %input.confirmation_code,
                    "Confirmation code issued"
                );
                return Ok(user);
            }
            Err(err) if err.is_unique_violation_of(UQ_CONFIRMATION_CODE) => {
                tracing::warn!(attempt, "Confirmation code already pending, drawing another");
                input.confirmation_code = generate_confirmation_code();
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(AppError::InternalError(format!(
        "No free confirmation code after {MAX_CODE_ATTEMPTS} attempts"
    )))
}
