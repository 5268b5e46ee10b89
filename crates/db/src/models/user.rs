//! User (account) entity model.
//!
//! Token issuance and session management happen outside this system; the
//! `users` table exists so projects have an owner to scope queries by and
//! an email address to resolve reminder recipients from.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taxtrack_core::types::{DbId, Timestamp};
use validator::Validate;

/// A user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub display_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a user account record.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub display_name: Option<String>,
}
