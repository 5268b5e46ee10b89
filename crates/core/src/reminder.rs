//! Reminder email composition and the dispatch outcome type.
//!
//! Composition is deterministic and does no I/O; the dispatcher in the API
//! crate pairs these with the SMTP transport.

use chrono::NaiveDate;
use serde::Serialize;

/// Result of evaluating a single project for notification.
///
/// Serialized into API responses with a `status` discriminator, e.g.
/// `{"status": "sent", "message_id": "<...>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The sent flag was already set; nothing was done.
    AlreadySent,
    /// The deadline is due soon and a reminder email went out.
    Sent { message_id: String },
    /// The deadline is more than the due-soon window away; the reminder was
    /// scheduled for a later sweep.
    Scheduled,
    /// The deadline has already passed; no reminder is sent and no state
    /// changes. Informational, not an error.
    PastDeadline,
}

/// Subject line for a deadline reminder.
pub fn reminder_subject(project_title: &str, days_remaining: i64) -> String {
    let unit = if days_remaining == 1 { "day" } else { "days" };
    format!("Deadline Reminder: {project_title} - Due in {days_remaining} {unit}")
}

/// Self-contained HTML body for a deadline reminder.
pub fn reminder_body(project_title: &str, client_name: &str, deadline: NaiveDate) -> String {
    let formatted_deadline = deadline.format("%-d %B %Y");
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <body style=\"font-family: Arial, sans-serif; line-height: 1.6; color: #333;\">\n\
         <h2>Project Deadline Reminder</h2>\n\
         <p>This is a reminder that your project deadline is approaching.</p>\n\
         <p><strong>Project:</strong> {project_title}</p>\n\
         <p><strong>Client:</strong> {client_name}</p>\n\
         <p><strong>Deadline:</strong> {formatted_deadline}</p>\n\
         <p>Please ensure all tasks are completed before the deadline.</p>\n\
         <p style=\"font-size: 12px; color: #7f8c8d;\">\
         This is an automated reminder from your accounting task tracker.</p>\n\
         </body>\n\
         </html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn subject_pluralizes_days() {
        assert_eq!(
            reminder_subject("Q2 VAT return", 1),
            "Deadline Reminder: Q2 VAT return - Due in 1 day"
        );
        assert_eq!(
            reminder_subject("Q2 VAT return", 0),
            "Deadline Reminder: Q2 VAT return - Due in 0 days"
        );
        assert_eq!(
            reminder_subject("Q2 VAT return", 3),
            "Deadline Reminder: Q2 VAT return - Due in 3 days"
        );
    }

    #[test]
    fn body_contains_project_client_and_deadline() {
        let body = reminder_body("Year-end close", "Acme GmbH", date(2025, 3, 31));
        assert!(body.contains("Year-end close"));
        assert!(body.contains("Acme GmbH"));
        assert!(body.contains("31 March 2025"));
    }

    #[test]
    fn body_is_deterministic() {
        let a = reminder_body("P", "C", date(2025, 1, 2));
        let b = reminder_body("P", "C", date(2025, 1, 2));
        assert_eq!(a, b);
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(DispatchOutcome::Sent {
            message_id: "<abc@taxtrack>".into(),
        })
        .unwrap();
        assert_eq!(json["status"], "sent");
        assert_eq!(json["message_id"], "<abc@taxtrack>");

        let json = serde_json::to_value(DispatchOutcome::PastDeadline).unwrap();
        assert_eq!(json["status"], "past_deadline");
    }
}
