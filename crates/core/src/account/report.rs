//! Monthly expense report.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

/// Total payable amount due in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    /// Month number (1-12).
    pub month: u32,
    /// Sum of amounts due in the month.
    pub total: Decimal,
}

/// Service for building account reports.
pub struct ReportService;

impl ReportService {
    /// Returns the half-open date range `[Jan 1 of year, Jan 1 of year + 1)`,
    /// or `None` when the year is outside the supported calendar.
    #[must_use]
    pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?;
        Some((start, end))
    }

    /// Sums `(due_date, amount)` rows per calendar month.
    ///
    /// Months appear in the order they are first seen. Callers pass rows of a
    /// single year sorted by due date, so the result is in ascending month
    /// order and only contains months with at least one row.
    #[must_use]
    pub fn monthly_totals<I>(rows: I) -> Vec<MonthlyTotal>
    where
        I: IntoIterator<Item = (NaiveDate, Decimal)>,
    {
        let mut totals: Vec<MonthlyTotal> = Vec::new();

        for (due_date, amount) in rows {
            let month = due_date.month();
            match totals.iter_mut().find(|t| t.month == month) {
                Some(entry) => entry.total += amount,
                None => totals.push(MonthlyTotal {
                    month,
                    total: amount,
                }),
            }
        }

        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_totals_groups_and_sums() {
        let rows = vec![
            (date(2024, 1, 10), dec!(100)),
            (date(2024, 1, 20), dec!(50)),
            (date(2024, 3, 5), dec!(200)),
        ];

        let totals = ReportService::monthly_totals(rows);

        assert_eq!(
            totals,
            vec![
                MonthlyTotal {
                    month: 1,
                    total: dec!(150)
                },
                MonthlyTotal {
                    month: 3,
                    total: dec!(200)
                },
            ]
        );
    }

    #[test]
    fn test_monthly_totals_keeps_first_seen_order() {
        let rows = vec![
            (date(2024, 7, 1), dec!(1)),
            (date(2024, 2, 1), dec!(2)),
            (date(2024, 7, 9), dec!(3)),
        ];

        let months: Vec<u32> = ReportService::monthly_totals(rows)
            .into_iter()
            .map(|t| t.month)
            .collect();

        assert_eq!(months, vec![7, 2]);
    }

    #[test]
    fn test_monthly_totals_empty() {
        assert!(ReportService::monthly_totals(Vec::new()).is_empty());
    }

    #[test]
    fn test_year_bounds() {
        assert_eq!(
            ReportService::year_bounds(2024),
            Some((date(2024, 1, 1), date(2025, 1, 1)))
        );
        assert_eq!(ReportService::year_bounds(i32::MAX), None);
    }
}
