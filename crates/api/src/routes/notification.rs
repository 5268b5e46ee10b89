//! Route definitions for the `/notifications` resource.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /    -> run_owner_sweep
/// POST   /    -> dispatch_one
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(notification::run_owner_sweep).post(notification::dispatch_one),
    )
}
