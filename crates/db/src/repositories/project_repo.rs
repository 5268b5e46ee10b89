//! Repository for the `projects` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use taxtrack_core::types::DbId;

use crate::models::project::{CreateProject, Project};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, title, client_name, deadline, \
                       notification_sent, notification_scheduled, created_at, updated_at";

/// Provides CRUD and notification-flag operations for projects.
///
/// All lookups except the global sweep queries are owner-scoped: a caller
/// can only ever see rows whose `owner_id` matches their account.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project for the given owner, returning the created row.
    /// Both notification flags start out false.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (owner_id, title, client_name, deadline)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.client_name)
            .bind(input.deadline)
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID, scoped to its owner.
    pub async fn find_by_id_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's projects, most recently created first.
    pub async fn list_for_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Projects across all owners with a deadline in `[start, end]` whose
    /// reminder has not been sent yet. Used by the global sweep.
    pub async fn find_due_in_window(
        pool: &PgPool,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE deadline >= $1 AND deadline <= $2 AND notification_sent = false
             ORDER BY deadline ASC, id ASC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }

    /// An owner's projects with a scheduled but not yet sent reminder.
    /// Used by the caller-scoped sweep.
    pub async fn find_scheduled_unsent_for_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE owner_id = $1 AND notification_scheduled = true AND notification_sent = false
             ORDER BY deadline ASC, id ASC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Set `notification_scheduled = true`. Idempotent; returns `true` when
    /// this call performed the transition.
    pub async fn mark_scheduled(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects
             SET notification_scheduled = true, updated_at = NOW()
             WHERE id = $1 AND notification_scheduled = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        let transitioned = result.rows_affected() > 0;
        if transitioned {
            tracing::debug!(project_id = id, "notification_scheduled set");
        }
        Ok(transitioned)
    }

    /// Atomically claim the sent flag: set both notification flags to true
    /// only if `notification_sent` is still false, reporting via the
    /// affected-row count whether this caller won the claim.
    ///
    /// Run inside a transaction, the row lock taken by this UPDATE blocks a
    /// concurrent dispatcher until commit or rollback, so two overlapping
    /// invocations cannot both send mail for the same project.
    pub async fn mark_sent_if_unsent<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE projects
             SET notification_sent = true, notification_scheduled = true, updated_at = NOW()
             WHERE id = $1 AND notification_sent = false",
        )
        .bind(id)
        .execute(executor)
        .await?;
        let claimed = result.rows_affected() > 0;
        tracing::debug!(project_id = id, claimed, "notification_sent claim attempted");
        Ok(claimed)
    }
}
