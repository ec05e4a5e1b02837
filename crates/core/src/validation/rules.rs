//! Field rule types and the ordered rule list for every validated field.
//!
//! A rule is a pure check of one candidate value. Rules for a field are
//! evaluated in declaration order and the first failure wins.

use validator::ValidateEmail;

// ---------------------------------------------------------------------------
// Length limits
// ---------------------------------------------------------------------------

/// Maximum length of a director name, in characters.
pub const DIRECTOR_NAME_MAX_CHARS: usize = 100;

/// Maximum length of a movie title, in characters.
pub const MOVIE_TITLE_MAX_CHARS: usize = 200;

/// Maximum length of a username, in characters.
pub const USERNAME_MAX_CHARS: usize = 150;

/// Number of digits in a confirmation code.
pub const CONFIRMATION_CODE_LENGTH: usize = 6;

/// Longest storable duration, the bound of the `INTEGER` column.
pub const MOVIE_DURATION_MAX: i64 = i32::MAX as i64;

/// Message for a field a create request must carry.
pub const REQUIRED: &str = "This field is required.";

/// Lowest accepted review rating.
pub const MIN_STARS: i64 = 1;

/// Highest accepted review rating.
pub const MAX_STARS: i64 = 5;

// ---------------------------------------------------------------------------
// Rule types
// ---------------------------------------------------------------------------

/// A check applied to a string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRule {
    /// Fails when the value is empty after trimming whitespace.
    NotBlank(&'static str),
    /// Fails when the value has more than `n` characters.
    MaxChars(usize),
    /// Fails when any character is not an ASCII digit.
    Digits(&'static str),
    /// Fails when the value is not a syntactically valid email address.
    Email(&'static str),
}

impl TextRule {
    /// Apply the rule, returning the failure message on violation.
    pub fn check(&self, value: &str) -> Result<(), String> {
        match *self {
            TextRule::NotBlank(message) => {
                if value.trim().is_empty() {
                    return Err(message.to_string());
                }
            }
            TextRule::MaxChars(max) => {
                if value.chars().count() > max {
                    return Err(format!(
                        "Ensure this field has no more than {max} characters."
                    ));
                }
            }
            TextRule::Digits(message) => {
                if !value.chars().all(|c| c.is_ascii_digit()) {
                    return Err(message.to_string());
                }
            }
            TextRule::Email(message) => {
                if !value.validate_email() {
                    return Err(message.to_string());
                }
            }
        }
        Ok(())
    }
}

/// A check applied to an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntRule {
    /// Fails when the value is zero or negative.
    Positive(&'static str),
    /// Fails when the value exceeds `max`.
    AtMost(i64),
    /// Fails when the value lies outside `min..=max`.
    Between {
        min: i64,
        max: i64,
        message: &'static str,
    },
}

impl IntRule {
    /// Apply the rule, returning the failure message on violation.
    pub fn check(&self, value: i64) -> Result<(), String> {
        match *self {
            IntRule::Positive(message) => {
                if value <= 0 {
                    return Err(message.to_string());
                }
            }
            IntRule::AtMost(max) => {
                if value > max {
                    return Err(format!(
                        "Ensure this value is less than or equal to {max}."
                    ));
                }
            }
            IntRule::Between { min, max, message } => {
                if !(min..=max).contains(&value) {
                    return Err(message.to_string());
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Per-field rule lists
// ---------------------------------------------------------------------------

pub const DIRECTOR_NAME: &[TextRule] = &[
    TextRule::NotBlank("Name cannot be empty."),
    TextRule::MaxChars(DIRECTOR_NAME_MAX_CHARS),
];

pub const MOVIE_TITLE: &[TextRule] = &[
    TextRule::NotBlank("Title cannot be empty."),
    TextRule::MaxChars(MOVIE_TITLE_MAX_CHARS),
];

pub const MOVIE_DURATION: &[IntRule] = &[
    IntRule::Positive("Duration must be a positive integer."),
    IntRule::AtMost(MOVIE_DURATION_MAX),
];

pub const REVIEW_TEXT: &[TextRule] = &[TextRule::NotBlank("Review text cannot be empty.")];

pub const REVIEW_STARS: &[IntRule] = &[IntRule::Between {
    min: MIN_STARS,
    max: MAX_STARS,
    message: "Rating must be between 1 and 5.",
}];

pub const USERNAME: &[TextRule] = &[
    TextRule::NotBlank("Username cannot be empty."),
    TextRule::MaxChars(USERNAME_MAX_CHARS),
];

pub const EMAIL: &[TextRule] = &[
    TextRule::NotBlank("Email cannot be empty."),
    TextRule::Email("Enter a valid email address."),
];

pub const CONFIRMATION_CODE: &[TextRule] = &[
    TextRule::NotBlank("Confirmation code cannot be empty."),
    TextRule::MaxChars(CONFIRMATION_CODE_LENGTH),
    TextRule::Digits("Confirmation code must contain only digits."),
];
