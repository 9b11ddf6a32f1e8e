//! Accounts payable/receivable rules.

pub mod limit;
pub mod report;
pub mod settlement;
pub mod types;

#[cfg(test)]
mod tests;

pub use limit::{MAX_ACCOUNTS_PER_MONTH, MonthlyLimit, MonthlyLimitExceeded, month_bounds};
pub use report::{MonthlyTotal, ReportService};
pub use settlement::{Settlement, settle};
pub use types::AccountKind;
