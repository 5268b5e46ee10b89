use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notify::Notifier;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: taxtrack_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Deadline-reminder dispatcher shared by all trigger surfaces.
    pub notifier: Arc<Notifier>,
}
