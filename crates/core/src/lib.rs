//! Shared types, errors and validation helpers for the itemstore crates.

pub mod error;
pub mod types;
pub mod validation;
