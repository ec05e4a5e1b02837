//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches
//!
//! The DTOs carry already-validated, stored types; request bodies are parsed
//! by the API layer.
//!
//! plus the read models of the aggregate views.

pub mod director;
pub mod movie;
pub mod review;
pub mod user;
