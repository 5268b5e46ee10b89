//! Repository for the `tasks` table.
//!
//! Ownership checks go through the parent project: handlers verify the
//! project belongs to the caller before mutating tasks, so the queries here
//! are keyed on plain task/project ids.

use sqlx::PgPool;
use taxtrack_core::types::DbId;

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, status, created_at, updated_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to `todo`.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (project_id, name, status)
             VALUES ($1, $2, COALESCE($3, 'todo'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tasks across all of an owner's projects, newest first,
    /// optionally restricted to a single project.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: DbId,
        project_id: Option<DbId>,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = "SELECT t.id, t.project_id, t.name, t.status, t.created_at, t.updated_at
             FROM tasks t
             JOIN projects p ON p.id = t.project_id
             WHERE p.owner_id = $1 AND ($2::BIGINT IS NULL OR t.project_id = $2)
             ORDER BY t.created_at DESC, t.id DESC";
        sqlx::query_as::<_, Task>(query)
            .bind(owner_id)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                name = COALESCE($2, name),
                status = COALESCE($3, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
