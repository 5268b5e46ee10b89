//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in `taxtrack_db` (and to the
//! [`Notifier`](crate::notify::Notifier) for reminder dispatch) and map
//! errors via [`AppError`](crate::error::AppError).

pub mod notification;
pub mod project;
pub mod task;
