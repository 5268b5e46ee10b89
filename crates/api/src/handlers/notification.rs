//! Handlers for reminder dispatch.
//!
//! Three triggers share the [`Notifier`](crate::notify::Notifier):
//! a single-project dispatch, an owner-scoped sweep, and the cron-facing
//! global sweep behind an optional shared secret.

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use taxtrack_core::error::CoreError;
use taxtrack_core::types::DbId;
use taxtrack_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /notifications`.
#[derive(Debug, Deserialize)]
pub struct DispatchRequest {
    pub project_id: DbId,
}

/// POST /api/v1/notifications
///
/// Evaluate one of the caller's projects and dispatch its reminder if it
/// is due within the window. Returns the outcome together with the
/// project's post-dispatch state.
pub async fn dispatch_one(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<DispatchRequest>,
) -> AppResult<Json<Value>> {
    let project = ProjectRepo::find_by_id_for_owner(&state.pool, input.project_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project_id,
        }))?;

    let outcome = state.notifier.evaluate_and_notify(&state.pool, &project).await?;

    // Reload so the response reflects any flag transitions.
    let project = ProjectRepo::find_by_id_for_owner(&state.pool, project.id, auth.user_id)
        .await?
        .unwrap_or(project);

    Ok(Json(json!({
        "data": {
            "outcome": outcome,
            "project": project,
        }
    })))
}

/// GET /api/v1/notifications
///
/// Sweep the caller's projects that carry a scheduled but unsent reminder.
pub async fn run_owner_sweep(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let report = state.notifier.sweep_owner(&state.pool, auth.user_id).await?;
    Ok(Json(json!({ "data": report })))
}

/// GET /api/v1/check-deadlines
///
/// Global sweep over every account, intended for an external cron invoker.
/// When `CRON_SECRET` is configured the caller must present it as a bearer
/// token; when it is not, the endpoint is open.
pub async fn check_deadlines(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<Value>> {
    if let Some(secret) = &state.config.cron_secret {
        let presented = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        if presented != Some(secret.as_str()) {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid cron secret".into(),
            )));
        }
    }

    let report = state.notifier.sweep_global(&state.pool).await?;
    Ok(Json(json!({ "data": report })))
}
