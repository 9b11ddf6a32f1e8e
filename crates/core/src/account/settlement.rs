//! Settlement (baixa) of an account.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Values recorded when an account is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// Date the account was settled.
    pub settled_on: NaiveDate,
    /// Amount settled; always the full account amount.
    pub settled_amount: Decimal,
}

/// Computes the settlement for an account.
///
/// Returns `None` when the account is already settled: settling twice must
/// not touch the recorded date or amount.
#[must_use]
pub fn settle(is_settled: bool, amount: Decimal, today: NaiveDate) -> Option<Settlement> {
    if is_settled {
        return None;
    }

    Some(Settlement {
        settled_on: today,
        settled_amount: amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_settle_open_account() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let settlement = settle(false, dec!(250.75), today).unwrap();

        assert_eq!(settlement.settled_on, today);
        assert_eq!(settlement.settled_amount, dec!(250.75));
    }

    #[test]
    fn test_settle_already_settled_is_noop() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(settle(true, dec!(250.75), today), None);
    }
}
