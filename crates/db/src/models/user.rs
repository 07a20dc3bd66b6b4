//! User entity model and DTOs.

use itemstore_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A user row from the `users` table, as exposed over HTTP.
///
/// Bookkeeping columns (`created_at`, `updated_at`) are not selected.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub login: String,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    /// Explicit primary key. Assigned by the sequence when omitted.
    #[serde(default)]
    pub id: Option<DbId>,
    #[validate(length(max = 30, message = "must be at most 30 characters"))]
    pub name: String,
    #[validate(length(max = 30, message = "must be at most 30 characters"))]
    pub login: String,
}
