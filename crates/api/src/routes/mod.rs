pub mod health;
pub mod notification;
pub mod project;
pub mod task;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                    list, create (create runs the inline reminder check)
///
/// /tasks                       list (?project_id), create
/// /tasks/{id}                  update, delete
///
/// /notifications               owner sweep (GET), single dispatch (POST)
///
/// /check-deadlines             global sweep for cron invokers (GET, secret-gated)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Project routes.
        .nest("/projects", project::router())
        // Task routes, ownership scoped through the parent project.
        .nest("/tasks", task::router())
        // Reminder dispatch for the authenticated owner.
        .nest("/notifications", notification::router())
        // Cron-facing global sweep, gated by CRON_SECRET instead of a JWT.
        .route(
            "/check-deadlines",
            get(handlers::notification::check_deadlines),
        )
}
