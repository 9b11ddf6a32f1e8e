//! `SeaORM` active enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored account kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(30))")]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    /// Bill to pay.
    #[sea_orm(string_value = "payable")]
    Payable,
    /// Amount to receive.
    #[sea_orm(string_value = "receivable")]
    Receivable,
}

impl From<contas_core::account::AccountKind> for AccountKind {
    fn from(kind: contas_core::account::AccountKind) -> Self {
        match kind {
            contas_core::account::AccountKind::Payable => Self::Payable,
            contas_core::account::AccountKind::Receivable => Self::Receivable,
        }
    }
}

impl From<AccountKind> for contas_core::account::AccountKind {
    fn from(kind: AccountKind) -> Self {
        match kind {
            AccountKind::Payable => Self::Payable,
            AccountKind::Receivable => Self::Receivable,
        }
    }
}
