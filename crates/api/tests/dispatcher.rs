//! Direct tests for the [`Notifier`] dispatch path, including the
//! concurrent-dispatch guarantee the HTTP tests cannot exercise.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration, NaiveDate};
use common::{seed_user, RecordingMailer, TEST_FALLBACK_EMAIL};
use sqlx::PgPool;
use taxtrack_api::notify::Notifier;
use taxtrack_core::deadline::today_utc;
use taxtrack_core::reminder::DispatchOutcome;
use taxtrack_core::types::DbId;
use taxtrack_db::models::project::{CreateProject, Project};
use taxtrack_db::repositories::ProjectRepo;

async fn seed_project(pool: &PgPool, owner_id: DbId, title: &str, deadline: NaiveDate) -> Project {
    ProjectRepo::create(
        pool,
        owner_id,
        &CreateProject {
            title: title.to_string(),
            client_name: "Acme Ltd".to_string(),
            deadline,
        },
    )
    .await
    .expect("seeding project should succeed")
}

fn notifier(mailer: Arc<RecordingMailer>) -> Notifier {
    Notifier::new(mailer, TEST_FALLBACK_EMAIL.to_string())
}

// ---------------------------------------------------------------------------
// Recipient resolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn reminder_goes_to_owner_email(pool: PgPool) {
    let owner_id = seed_user(&pool, "owner@example.com").await;
    let project = seed_project(&pool, owner_id, "VAT return", today_utc()).await;
    let mailer = RecordingMailer::new();

    let outcome = notifier(mailer.clone())
        .evaluate_and_notify(&pool, &project)
        .await
        .unwrap();

    assert_matches!(outcome, DispatchOutcome::Sent { .. });
    assert_eq!(mailer.sent()[0].to, "owner@example.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_owner_falls_back_to_configured_recipient(pool: PgPool) {
    let owner_id = seed_user(&pool, "owner@example.com").await;
    let project = seed_project(&pool, owner_id, "VAT return", today_utc()).await;
    let mailer = RecordingMailer::new();

    // Recipient resolution works from the in-memory row; point it at an
    // account id that does not exist to force the fallback path.
    let stale = Project {
        owner_id: owner_id + 9999,
        ..project
    };

    let outcome = notifier(mailer.clone())
        .evaluate_and_notify(&pool, &stale)
        .await
        .unwrap();

    assert_matches!(outcome, DispatchOutcome::Sent { .. });
    assert_eq!(mailer.sent()[0].to, TEST_FALLBACK_EMAIL);
}

// ---------------------------------------------------------------------------
// Concurrency: two overlapping dispatches send exactly one email
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn concurrent_dispatch_sends_exactly_once(pool: PgPool) {
    let owner_id = seed_user(&pool, "owner@example.com").await;
    let project = seed_project(&pool, owner_id, "Race filing", today_utc() + Duration::days(1)).await;
    let mailer = RecordingMailer::new();
    let notifier = Arc::new(notifier(mailer.clone()));

    let (a, b) = tokio::join!(
        notifier.evaluate_and_notify(&pool, &project),
        notifier.evaluate_and_notify(&pool, &project),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    // One invocation wins the claim; the loser observes AlreadySent after
    // the row lock releases. Never two emails.
    let sent_count = [&a, &b]
        .iter()
        .filter(|o| matches!(o, DispatchOutcome::Sent { .. }))
        .count();
    let already_count = [&a, &b]
        .iter()
        .filter(|o| matches!(o, DispatchOutcome::AlreadySent))
        .count();

    assert_eq!(sent_count, 1, "exactly one dispatch must send");
    assert_eq!(already_count, 1, "the other must observe AlreadySent");
    assert_eq!(mailer.count(), 1);
}

// ---------------------------------------------------------------------------
// Flag monotonicity across outcomes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn scheduled_then_sent_never_regresses(pool: PgPool) {
    let owner_id = seed_user(&pool, "owner@example.com").await;
    let project = seed_project(
        &pool,
        owner_id,
        "Two-phase filing",
        today_utc() + Duration::days(10),
    )
    .await;
    let mailer = RecordingMailer::new();
    let notifier = notifier(mailer.clone());

    // Outside the window: scheduled only.
    let outcome = notifier.evaluate_and_notify(&pool, &project).await.unwrap();
    assert_matches!(outcome, DispatchOutcome::Scheduled);

    // Time passes: simulate by moving the deadline into the window.
    sqlx::query("UPDATE projects SET deadline = $2 WHERE id = $1")
        .bind(project.id)
        .bind(today_utc() + Duration::days(2))
        .execute(&pool)
        .await
        .unwrap();
    let project = ProjectRepo::find_by_id_for_owner(&pool, project.id, owner_id)
        .await
        .unwrap()
        .unwrap();
    assert!(project.notification_scheduled);

    let outcome = notifier.evaluate_and_notify(&pool, &project).await.unwrap();
    assert_matches!(outcome, DispatchOutcome::Sent { .. });

    let project = ProjectRepo::find_by_id_for_owner(&pool, project.id, owner_id)
        .await
        .unwrap()
        .unwrap();
    assert!(project.notification_scheduled && project.notification_sent);
    assert_eq!(mailer.count(), 1);
}
