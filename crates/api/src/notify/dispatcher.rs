//! Single-project reminder evaluation and dispatch.

use std::sync::Arc;

use taxtrack_core::deadline::{classify, today_utc};
use taxtrack_core::reminder::{reminder_body, reminder_subject, DispatchOutcome};
use taxtrack_core::types::DbId;
use taxtrack_db::models::project::Project;
use taxtrack_db::repositories::{ProjectRepo, UserRepo};
use taxtrack_db::DbPool;
use taxtrack_mailer::{MailError, MailTransport};

/// Failure while dispatching a reminder.
///
/// Transport failures leave the notification flags unchanged, so a later
/// trigger can retry the project.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error(transparent)]
    Db(#[from] sqlx::Error),

    #[error(transparent)]
    Mail(#[from] MailError),
}

/// Evaluates projects against their deadline and sends reminder emails.
pub struct Notifier {
    mailer: Arc<dyn MailTransport>,
    fallback_email: String,
}

impl Notifier {
    /// Create a notifier over the given transport.
    ///
    /// `fallback_email` is used whenever the project owner's address cannot
    /// be resolved.
    pub fn new(mailer: Arc<dyn MailTransport>, fallback_email: String) -> Self {
        Self {
            mailer,
            fallback_email,
        }
    }

    /// Evaluate one project and act on the result.
    ///
    /// - sent flag already set: [`DispatchOutcome::AlreadySent`], no action.
    /// - overdue: [`DispatchOutcome::PastDeadline`], no state change.
    /// - due in more than 3 days: sets `notification_scheduled`, returns
    ///   [`DispatchOutcome::Scheduled`].
    /// - due within 3 days: claims the sent flag with a conditional update
    ///   inside a transaction, sends the email, then commits. The row lock
    ///   taken by the claim is held across the transport call, so a
    ///   concurrent invocation on the same project blocks and then observes
    ///   `AlreadySent` instead of sending a second email. On transport
    ///   failure the transaction rolls back and the flags stay false.
    pub async fn evaluate_and_notify(
        &self,
        pool: &DbPool,
        project: &Project,
    ) -> Result<DispatchOutcome, NotifyError> {
        if project.notification_sent {
            return Ok(DispatchOutcome::AlreadySent);
        }

        let status = classify(today_utc(), project.deadline);

        if status.is_overdue {
            tracing::info!(
                project_id = project.id,
                days_remaining = status.days_remaining,
                "Deadline already passed, no reminder"
            );
            return Ok(DispatchOutcome::PastDeadline);
        }

        if !status.is_due_soon {
            ProjectRepo::mark_scheduled(pool, project.id).await?;
            tracing::debug!(
                project_id = project.id,
                days_remaining = status.days_remaining,
                "Reminder scheduled for a later sweep"
            );
            return Ok(DispatchOutcome::Scheduled);
        }

        let recipient = self.resolve_recipient(pool, project.owner_id).await;
        let subject = reminder_subject(&project.title, status.days_remaining);
        let body = reminder_body(&project.title, &project.client_name, project.deadline);

        let mut tx = pool.begin().await?;
        if !ProjectRepo::mark_sent_if_unsent(&mut *tx, project.id).await? {
            // Another invocation won the claim while we were evaluating.
            return Ok(DispatchOutcome::AlreadySent);
        }

        match self.mailer.send(&recipient, &subject, &body).await {
            Ok(message_id) => {
                if let Err(e) = tx.commit().await {
                    // The SMTP server accepted the message but the flag
                    // update did not stick: the email has gone out and a
                    // later trigger may send another. Surface, don't hide.
                    tracing::error!(
                        project_id = project.id,
                        error = %e,
                        "Reminder sent but flag update failed"
                    );
                    return Err(NotifyError::Db(e));
                }
                tracing::info!(project_id = project.id, to = %recipient, "Reminder sent");
                Ok(DispatchOutcome::Sent { message_id })
            }
            Err(e) => {
                tx.rollback().await?;
                tracing::warn!(
                    project_id = project.id,
                    error = %e,
                    "Reminder transport failed, flags unchanged"
                );
                Err(NotifyError::Mail(e))
            }
        }
    }

    /// Resolve the reminder recipient for an account.
    ///
    /// Lookup failure degrades to the configured fallback address and is
    /// logged; it never aborts the dispatch.
    async fn resolve_recipient(&self, pool: &DbPool, owner_id: DbId) -> String {
        match UserRepo::resolve_email(pool, owner_id).await {
            Ok(Some(email)) => email,
            Ok(None) => {
                tracing::warn!(owner_id, "Owner has no email on file, using fallback recipient");
                self.fallback_email.clone()
            }
            Err(e) => {
                tracing::warn!(owner_id, error = %e, "Recipient lookup failed, using fallback");
                self.fallback_email.clone()
            }
        }
    }
}
