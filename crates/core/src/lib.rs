//! Pure domain logic for the taxtrack deadline tracker.
//!
//! Everything here is side-effect free: date arithmetic for deadline
//! classification, reminder email composition, and the shared error and
//! id/timestamp types. I/O (database, SMTP, HTTP) lives in the `taxtrack-db`,
//! `taxtrack-mailer`, and `taxtrack-api` crates.

pub mod deadline;
pub mod error;
pub mod reminder;
pub mod types;
