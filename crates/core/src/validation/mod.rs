//! Field-level validation.
//!
//! - [`rules`] -- rule types and the ordered rule list of each field.
//! - [`catalog`] -- director, movie and review validators.
//! - [`account`] -- registration and confirmation validators.
//!
//! Validators take `Option`s so partial updates only check the fields they
//! carry. Failures are collected into [`FieldErrors`], which lists every
//! failing field rather than stopping at the first one.

pub mod account;
pub mod catalog;
pub mod rules;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::CoreError;
use rules::{IntRule, TextRule};

/// Field name -> failure messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a single-field error set.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Run `rules` against a string value, recording the first failure.
    pub fn check_text(&mut self, field: &str, value: &str, rules: &[TextRule]) {
        if let Some(message) = rules.iter().find_map(|rule| rule.check(value).err()) {
            self.add(field, message);
        }
    }

    /// Run `rules` against an integer value, recording the first failure.
    pub fn check_int(&mut self, field: &str, value: i64, rules: &[IntRule]) {
        if let Some(message) = rules.iter().find_map(|rule| rule.check(value).err()) {
            self.add(field, message);
        }
    }

    /// Merge another error set into this one.
    pub fn extend(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when nothing failed, otherwise a [`CoreError::Validation`].
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}
