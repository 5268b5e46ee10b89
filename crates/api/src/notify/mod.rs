//! Deadline-reminder dispatch.
//!
//! [`Notifier`] is the single decision path used by every trigger surface
//! (project creation, the on-demand endpoint, the owner-scoped sweep, and
//! the global cron sweep), so the 3-day threshold and the flag semantics
//! cannot drift between call sites.

pub mod dispatcher;
pub mod sweep;

pub use dispatcher::{Notifier, NotifyError};
pub use sweep::SweepReport;
