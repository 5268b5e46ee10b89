//! Handlers for the `/tasks` resource.
//!
//! Ownership is checked through the parent project: an unknown task is a
//! 404, a task under someone else's project is a 403.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use taxtrack_core::error::CoreError;
use taxtrack_core::types::DbId;
use taxtrack_db::models::task::{CreateTask, Task, UpdateTask};
use taxtrack_db::repositories::{ProjectRepo, TaskRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /tasks`.
#[derive(Debug, Deserialize)]
pub struct TaskQuery {
    /// Restrict the listing to one of the caller's projects.
    pub project_id: Option<DbId>,
}

/// GET /api/v1/tasks
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<TaskQuery>,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = TaskRepo::list_for_owner(&state.pool, auth.user_id, params.project_id).await?;
    Ok(Json(tasks))
}

/// POST /api/v1/tasks
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    // The parent project must belong to the caller.
    ProjectRepo::find_by_id_for_owner(&state.pool, input.project_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project_id,
        }))?;

    let task = TaskRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /api/v1/tasks/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    load_owned_task(&state, id, auth.user_id).await?;

    let task = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id,
        }))?;
    Ok(Json(task))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_owned_task(&state, id, auth.user_id).await?;

    let deleted = TaskRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Task", id }))
    }
}

/// Load a task and verify its parent project belongs to `owner_id`.
async fn load_owned_task(state: &AppState, task_id: DbId, owner_id: DbId) -> AppResult<Task> {
    let task = TaskRepo::find_by_id(&state.pool, task_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: task_id,
        }))?;

    ProjectRepo::find_by_id_for_owner(&state.pool, task.project_id, owner_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "Task belongs to another account's project".into(),
            ))
        })?;

    Ok(task)
}
