//! Domain building blocks shared by the store and the HTTP layer.
//!
//! Nothing in this crate performs I/O: it holds the id/timestamp aliases,
//! the domain error type, the per-field validation rules and confirmation
//! code generation.

pub mod confirmation;
pub mod error;
pub mod types;
pub mod validation;
