//! Validators for the registration and confirmation requests.

use crate::error::CoreError;

use super::rules::{CONFIRMATION_CODE, EMAIL, USERNAME};
use super::FieldErrors;

/// Check username and email of a registration request.
///
/// Password strength is checked by the caller, which owns the hashing policy,
/// and merged into the returned set.
pub fn registration_errors(username: &str, email: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.check_text("username", username, USERNAME);
    errors.check_text("email", email, EMAIL);
    errors
}

pub fn validate_confirmation_code(code: &str) -> Result<(), CoreError> {
    let mut errors = FieldErrors::new();
    errors.check_text("confirmation_code", code, CONFIRMATION_CODE);
    errors.into_result()
}
