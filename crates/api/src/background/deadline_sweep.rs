//! Optional in-process periodic deadline sweep.
//!
//! Deployments without an external cron invoker for `GET /check-deadlines`
//! can enable this task via `DEADLINE_SWEEP_INTERVAL_SECS`. It runs the
//! same global sweep on a fixed interval using `tokio::time::interval`.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::notify::Notifier;
use taxtrack_db::DbPool;

/// Run the deadline sweep loop until `cancel` is triggered.
pub async fn run(
    pool: DbPool,
    notifier: Arc<Notifier>,
    interval_secs: u64,
    cancel: CancellationToken,
) {
    tracing::info!(interval_secs, "Deadline sweep job started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Deadline sweep job stopping");
                break;
            }
            _ = interval.tick() => {
                match notifier.sweep_global(&pool).await {
                    Ok(report) => {
                        if report.sent > 0 || !report.errors.is_empty() {
                            tracing::info!(
                                checked = report.checked,
                                sent = report.sent,
                                errors = report.errors.len(),
                                "Periodic deadline sweep completed"
                            );
                        } else {
                            tracing::debug!(checked = report.checked, "Periodic deadline sweep: nothing to send");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Periodic deadline sweep failed");
                    }
                }
            }
        }
    }
}
