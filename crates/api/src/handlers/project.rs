//! Handlers for the `/projects` resource.
//!
//! All endpoints require authentication via [`AuthUser`]; every query is
//! scoped to the caller's account.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use taxtrack_core::error::CoreError;
use taxtrack_core::reminder::DispatchOutcome;
use taxtrack_db::models::project::{CreateProject, Project};
use taxtrack_db::repositories::ProjectRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response for `POST /projects`: the created row plus the result of the
/// inline post-create notification check.
#[derive(Debug, Serialize)]
pub struct CreatedProject {
    pub project: Project,
    /// `None` when the post-create check itself failed; the creation still
    /// succeeded and a later trigger will pick the project up.
    pub notification: Option<DispatchOutcome>,
}

/// POST /api/v1/projects
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<CreatedProject>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let project = ProjectRepo::create(&state.pool, auth.user_id, &input).await?;

    // Inline creation-time check. A dispatch failure is reported in the
    // response but never fails the create itself.
    let notification = match state.notifier.evaluate_and_notify(&state.pool, &project).await {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            tracing::warn!(project_id = project.id, error = %e, "Post-create notification check failed");
            None
        }
    };

    // Reload so the response reflects any flag transitions from the check.
    let project = ProjectRepo::find_by_id_for_owner(&state.pool, project.id, auth.user_id)
        .await?
        .unwrap_or(project);

    Ok((
        StatusCode::CREATED,
        Json(CreatedProject {
            project,
            notification,
        }),
    ))
}

/// GET /api/v1/projects
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_for_owner(&state.pool, auth.user_id).await?;
    Ok(Json(projects))
}
