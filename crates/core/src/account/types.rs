//! Account domain types.

use serde::{Deserialize, Serialize};

/// Whether an account is a bill to pay or an amount to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    /// Money owed to a supplier.
    #[serde(alias = "pagar")]
    Payable,
    /// Money owed by a client.
    #[serde(alias = "receber")]
    Receivable,
}

impl AccountKind {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Payable => "payable",
            Self::Receivable => "receivable",
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_kind_display_matches_as_str() {
        assert_eq!(AccountKind::Payable.to_string(), "payable");
        assert_eq!(AccountKind::Receivable.to_string(), "receivable");
    }
}
