//! Batch reminder sweeps.
//!
//! Two independent entry points select different project sets but share the
//! dispatcher: the owner-scoped sweep covers projects the caller scheduled,
//! the global sweep covers every unsent project due within the window.
//! Per-project failures are isolated; one bad project never aborts a batch.

use serde::Serialize;
use taxtrack_core::deadline::{today_utc, DUE_SOON_WINDOW_DAYS};
use taxtrack_core::reminder::DispatchOutcome;
use taxtrack_core::types::DbId;
use taxtrack_db::models::project::Project;
use taxtrack_db::repositories::ProjectRepo;
use taxtrack_db::DbPool;

use super::dispatcher::Notifier;

/// Aggregated result of a sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    /// Number of projects evaluated.
    pub checked: usize,
    /// Number of reminder emails dispatched.
    pub sent: usize,
    /// Projects whose dispatch failed (transport or flag update).
    pub errors: Vec<DbId>,
}

impl Notifier {
    /// Sweep one owner's projects with a scheduled but unsent reminder.
    pub async fn sweep_owner(
        &self,
        pool: &DbPool,
        owner_id: DbId,
    ) -> Result<SweepReport, sqlx::Error> {
        let projects = ProjectRepo::find_scheduled_unsent_for_owner(pool, owner_id).await?;
        Ok(self.run_batch(pool, projects).await)
    }

    /// Sweep all owners' unsent projects with a deadline inside the
    /// due-soon window, `[today, today + 3]`. Used by the cron trigger.
    pub async fn sweep_global(&self, pool: &DbPool) -> Result<SweepReport, sqlx::Error> {
        let today = today_utc();
        let end = today + chrono::Duration::days(DUE_SOON_WINDOW_DAYS);
        let projects = ProjectRepo::find_due_in_window(pool, today, end).await?;
        Ok(self.run_batch(pool, projects).await)
    }

    /// Dispatch each project in turn, isolating per-project failures.
    async fn run_batch(&self, pool: &DbPool, projects: Vec<Project>) -> SweepReport {
        let mut report = SweepReport {
            checked: projects.len(),
            sent: 0,
            errors: Vec::new(),
        };

        for project in &projects {
            match self.evaluate_and_notify(pool, project).await {
                Ok(DispatchOutcome::Sent { .. }) => report.sent += 1,
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(project_id = project.id, error = %e, "Sweep dispatch failed");
                    report.errors.push(project.id);
                }
            }
        }

        tracing::info!(
            checked = report.checked,
            sent = report.sent,
            errors = report.errors.len(),
            "Deadline sweep finished"
        );
        report
    }
}
