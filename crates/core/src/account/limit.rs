//! Monthly account creation limit.
//!
//! At most [`MAX_ACCOUNTS_PER_MONTH`] accounts may share a due-date calendar
//! month. The bucket is the (year, month) pair of the due date, regardless of
//! kind or party. Only creation is checked; updates never re-check.

use chrono::{Datelike, Months, NaiveDate};
use thiserror::Error;

/// Maximum number of accounts whose due date falls in the same month.
pub const MAX_ACCOUNTS_PER_MONTH: u64 = 5;

/// The month already holds the maximum number of accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Monthly limit of {limit} accounts reached for {year}-{month:02}")]
pub struct MonthlyLimitExceeded {
    /// Year of the rejected due date.
    pub year: i32,
    /// Month (1-12) of the rejected due date.
    pub month: u32,
    /// Limit in force.
    pub limit: u64,
}

/// Returns the half-open range `[first day of month, first day of next month)`
/// containing `date`.
#[must_use]
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date.with_day(1).unwrap_or(date);
    let end = start
        .checked_add_months(Months::new(1))
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}

/// Creation limit per due-date month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyLimit {
    max_per_month: u64,
}

impl Default for MonthlyLimit {
    fn default() -> Self {
        Self::new(MAX_ACCOUNTS_PER_MONTH)
    }
}

impl MonthlyLimit {
    /// Creates a limit allowing `max_per_month` accounts per month.
    #[must_use]
    pub const fn new(max_per_month: u64) -> Self {
        Self { max_per_month }
    }

    /// Checks whether another account due on `due_date` may be created when
    /// `existing` accounts are already due in that month.
    ///
    /// # Errors
    ///
    /// Returns `MonthlyLimitExceeded` when `existing` has reached the limit.
    pub fn check(&self, due_date: NaiveDate, existing: u64) -> Result<(), MonthlyLimitExceeded> {
        if existing >= self.max_per_month {
            return Err(MonthlyLimitExceeded {
                year: due_date.year(),
                month: due_date.month(),
                limit: self.max_per_month,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2024, 1, 10), date(2024, 1, 1), date(2024, 2, 1))]
    #[case(date(2024, 1, 1), date(2024, 1, 1), date(2024, 2, 1))]
    #[case(date(2024, 2, 29), date(2024, 2, 1), date(2024, 3, 1))]
    #[case(date(2024, 12, 31), date(2024, 12, 1), date(2025, 1, 1))]
    fn test_month_bounds(
        #[case] input: NaiveDate,
        #[case] start: NaiveDate,
        #[case] end: NaiveDate,
    ) {
        assert_eq!(month_bounds(input), (start, end));
    }

    #[test]
    fn test_limit_allows_below_maximum() {
        let limit = MonthlyLimit::default();
        for existing in 0..MAX_ACCOUNTS_PER_MONTH {
            assert!(limit.check(date(2024, 5, 3), existing).is_ok());
        }
    }

    #[test]
    fn test_limit_rejects_at_maximum() {
        let err = MonthlyLimit::default()
            .check(date(2024, 5, 3), MAX_ACCOUNTS_PER_MONTH)
            .unwrap_err();

        assert_eq!(
            err,
            MonthlyLimitExceeded {
                year: 2024,
                month: 5,
                limit: 5
            }
        );
        assert_eq!(err.to_string(), "Monthly limit of 5 accounts reached for 2024-05");
    }

    #[test]
    fn test_custom_limit() {
        let limit = MonthlyLimit::new(1);
        assert!(limit.check(date(2024, 5, 3), 0).is_ok());
        assert!(limit.check(date(2024, 5, 3), 1).is_err());
    }
}
