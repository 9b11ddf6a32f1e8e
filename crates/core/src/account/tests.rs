//! Property-based tests for account rules.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::limit::MonthlyLimit;
use super::report::ReportService;
use super::settlement::settle;

fn row_strategy() -> impl Strategy<Value = (NaiveDate, Decimal)> {
    (1u32..=12, 1u32..=28, 1i64..100_000_000).prop_map(|(month, day, cents)| {
        (
            NaiveDate::from_ymd_opt(2024, month, day).unwrap(),
            Decimal::new(cents, 2),
        )
    })
}

proptest! {
    /// The report never loses or invents money.
    #[test]
    fn test_report_total_matches_input_total(
        rows in prop::collection::vec(row_strategy(), 0..60),
    ) {
        let expected: Decimal = rows.iter().map(|(_, amount)| *amount).sum();

        let totals = ReportService::monthly_totals(rows);
        let actual: Decimal = totals.iter().map(|t| t.total).sum();

        prop_assert_eq!(actual, expected);
    }

    /// One entry per month present, each summing exactly that month's rows.
    #[test]
    fn test_report_one_entry_per_month(
        rows in prop::collection::vec(row_strategy(), 0..60),
    ) {
        let totals = ReportService::monthly_totals(rows.clone());

        for month in 1..=12u32 {
            let in_month: Vec<Decimal> = rows
                .iter()
                .filter(|(d, _)| d.month() == month)
                .map(|(_, a)| *a)
                .collect();
            let entries: Vec<_> = totals.iter().filter(|t| t.month == month).collect();

            if in_month.is_empty() {
                prop_assert!(entries.is_empty());
            } else {
                prop_assert_eq!(entries.len(), 1);
                prop_assert_eq!(entries[0].total, in_month.iter().copied().sum::<Decimal>());
            }
        }
    }

    /// Rows scanned in due-date order produce ascending months.
    #[test]
    fn test_report_sorted_scan_is_ascending(
        mut rows in prop::collection::vec(row_strategy(), 0..60),
    ) {
        rows.sort_by_key(|(d, _)| *d);

        let months: Vec<u32> = ReportService::monthly_totals(rows)
            .into_iter()
            .map(|t| t.month)
            .collect();

        prop_assert!(months.windows(2).all(|w| w[0] < w[1]));
    }

    /// Creation is allowed exactly while the month is below the limit.
    #[test]
    fn test_limit_boundary(max in 1u64..50, existing in 0u64..100) {
        let due = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let result = MonthlyLimit::new(max).check(due, existing);

        prop_assert_eq!(result.is_ok(), existing < max);
    }

    /// Settling records the full amount, and a settled account stays untouched.
    #[test]
    fn test_settle_records_full_amount((today, amount) in row_strategy()) {
        let settlement = settle(false, amount, today).unwrap();
        prop_assert_eq!(settlement.settled_amount, amount);
        prop_assert_eq!(settlement.settled_on, today);
        prop_assert!(settle(true, amount, today).is_none());
    }
}
