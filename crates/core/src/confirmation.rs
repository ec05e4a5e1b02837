//! Confirmation code generation for account activation.

use rand::Rng;

use crate::validation::rules::CONFIRMATION_CODE_LENGTH;

/// Exclusive upper bound of the numeric code space (`10^CONFIRMATION_CODE_LENGTH`).
const CODE_SPACE: u32 = 1_000_000;

/// Generate a random, zero-padded numeric confirmation code.
pub fn generate_confirmation_code() -> String {
    let value = rand::rng().random_range(0..CODE_SPACE);
    format!("{value:0width$}", width = CONFIRMATION_CODE_LENGTH)
}
