//! Credential handling for the account endpoints.

pub mod password;
