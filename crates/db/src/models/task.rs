//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taxtrack_core::types::{DbId, Timestamp};
use validator::Validate;

/// Three-state task status, stored as TEXT with a CHECK constraint.
/// The wire and storage form is kebab-case: `todo`, `in-progress`, `done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub status: TaskStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task. `status` defaults to `todo` when omitted.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    pub project_id: DbId,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub status: Option<TaskStatus>,
}

/// DTO for updating an existing task. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTask {
    pub name: Option<String>,
    pub status: Option<TaskStatus>,
}
