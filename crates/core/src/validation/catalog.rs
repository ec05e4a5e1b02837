//! Validators for directors, movies and reviews.
//!
//! `None` means the field is not part of the request. A create request
//! ([`Presence::Required`]) reports it as missing; a partial update
//! ([`Presence::Optional`]) skips it.

use crate::error::CoreError;
use crate::types::DbId;

use super::rules::{DIRECTOR_NAME, MOVIE_DURATION, MOVIE_TITLE, REQUIRED, REVIEW_STARS, REVIEW_TEXT};
use super::FieldErrors;

/// Whether absent fields are an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Movie fields as received, before narrowing to the stored types.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovieFields<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub duration: Option<i64>,
    pub director: Option<DbId>,
}

/// Review fields as received. `stars` may be absent on create; it has a
/// default.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewFields<'a> {
    pub text: Option<&'a str>,
    pub stars: Option<i64>,
    pub movie: Option<DbId>,
}

/// Record [`REQUIRED`] for an absent field when presence is required.
fn required<T>(errors: &mut FieldErrors, field: &str, value: Option<T>, presence: Presence) -> Option<T> {
    if value.is_none() && presence == Presence::Required {
        errors.add(field, REQUIRED);
    }
    value
}

pub fn validate_director(name: Option<&str>, presence: Presence) -> Result<(), CoreError> {
    let mut errors = FieldErrors::new();
    if let Some(name) = required(&mut errors, "name", name, presence) {
        errors.check_text("name", name, DIRECTOR_NAME);
    }
    errors.into_result()
}

pub fn validate_movie(fields: &MovieFields<'_>, presence: Presence) -> Result<(), CoreError> {
    let mut errors = FieldErrors::new();
    if let Some(title) = required(&mut errors, "title", fields.title, presence) {
        errors.check_text("title", title, MOVIE_TITLE);
    }
    required(&mut errors, "description", fields.description, presence);
    if let Some(duration) = required(&mut errors, "duration", fields.duration, presence) {
        errors.check_int("duration", duration, MOVIE_DURATION);
    }
    required(&mut errors, "director", fields.director, presence);
    errors.into_result()
}

pub fn validate_review(fields: &ReviewFields<'_>, presence: Presence) -> Result<(), CoreError> {
    let mut errors = FieldErrors::new();
    if let Some(text) = required(&mut errors, "text", fields.text, presence) {
        errors.check_text("text", text, REVIEW_TEXT);
    }
    if let Some(stars) = fields.stars {
        errors.check_int("stars", stars, REVIEW_STARS);
    }
    required(&mut errors, "movie", fields.movie, presence);
    errors.into_result()
}

/// Field error for a reference to a parent row that does not exist.
pub fn missing_reference(field: &str, id: DbId) -> FieldErrors {
    FieldErrors::single(field, format!("Invalid pk \"{id}\" - object does not exist."))
}
