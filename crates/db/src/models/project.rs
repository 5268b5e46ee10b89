//! Project entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taxtrack_core::types::{DbId, Timestamp};
use validator::Validate;

/// A project row from the `projects` table.
///
/// `notification_sent` and `notification_scheduled` only ever transition
/// from `false` to `true`; the schema enforces that a sent reminder is
/// always also scheduled.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub client_name: String,
    /// Calendar date only; deadline comparisons are date-only in UTC.
    pub deadline: NaiveDate,
    pub notification_sent: bool,
    pub notification_scheduled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. The owner comes from the authenticated
/// caller, never from the request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "client_name must not be empty"))]
    pub client_name: String,
    pub deadline: NaiveDate,
}
