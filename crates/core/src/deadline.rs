//! Deadline classification.
//!
//! All date arithmetic is done on calendar dates truncated to **UTC
//! midnight**. Every trigger surface (project creation, on-demand dispatch,
//! periodic sweep) must classify through [`classify`] with a reference date
//! obtained from [`today_utc`] so the day-boundary behaviour is identical
//! everywhere.

use chrono::NaiveDate;

/// Number of days before the deadline at which a reminder becomes due,
/// inclusive. A project due in 0..=3 whole days is "due soon".
pub const DUE_SOON_WINDOW_DAYS: i64 = 3;

/// Classification of a project deadline relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineStatus {
    /// Whole calendar days from `today` to the deadline. Negative when the
    /// deadline has passed, zero when the deadline is today.
    pub days_remaining: i64,
    /// The deadline is strictly in the past.
    pub is_overdue: bool,
    /// The deadline is within [`DUE_SOON_WINDOW_DAYS`] days, inclusive of
    /// today and of the window boundary.
    pub is_due_soon: bool,
}

/// Classify `deadline` against `today`.
///
/// Both inputs are calendar dates, so there is no time-of-day component to
/// truncate; callers using the current instant must go through
/// [`today_utc`].
pub fn classify(today: NaiveDate, deadline: NaiveDate) -> DeadlineStatus {
    let days_remaining = (deadline - today).num_days();
    DeadlineStatus {
        days_remaining,
        is_overdue: days_remaining < 0,
        is_due_soon: (0..=DUE_SOON_WINDOW_DAYS).contains(&days_remaining),
    }
}

/// The canonical "today" for deadline comparisons: the current UTC date.
pub fn today_utc() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn deadline_today_is_due_soon_not_overdue() {
        let today = date(2025, 6, 10);
        let status = classify(today, today);
        assert_eq!(status.days_remaining, 0);
        assert!(!status.is_overdue);
        assert!(status.is_due_soon);
    }

    #[test]
    fn deadline_yesterday_is_overdue() {
        let status = classify(date(2025, 6, 10), date(2025, 6, 9));
        assert_eq!(status.days_remaining, -1);
        assert!(status.is_overdue);
        assert!(!status.is_due_soon);
    }

    #[test]
    fn due_soon_window_is_inclusive_at_three_days() {
        let status = classify(date(2025, 6, 10), date(2025, 6, 13));
        assert_eq!(status.days_remaining, 3);
        assert!(status.is_due_soon);
    }

    #[test]
    fn four_days_out_is_not_due_soon() {
        let status = classify(date(2025, 6, 10), date(2025, 6, 14));
        assert_eq!(status.days_remaining, 4);
        assert!(!status.is_due_soon);
        assert!(!status.is_overdue);
    }

    #[test]
    fn overdue_is_exactly_deadline_before_today() {
        // No off-by-one at the boundary: D == T must not be overdue.
        let today = date(2025, 1, 1);
        for offset in -5_i64..=5 {
            let deadline = today + chrono::Duration::days(offset);
            let status = classify(today, deadline);
            assert_eq!(status.is_overdue, deadline < today, "offset {offset}");
        }
    }

    #[test]
    fn classification_crosses_month_and_year_boundaries() {
        let status = classify(date(2025, 12, 30), date(2026, 1, 2));
        assert_eq!(status.days_remaining, 3);
        assert!(status.is_due_soon);
    }
}
