//! Account repository for payable/receivable database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, IsolationLevel, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, RuntimeErr,
    Set, TransactionTrait,
};
use tracing::warn;

use contas_core::account::{
    AccountKind, MonthlyLimit, MonthlyLimitExceeded, MonthlyTotal, ReportService, month_bounds,
    settle,
};

use crate::entities::{accounts, parties, sea_orm_active_enums};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(i32),

    /// Referenced party not found.
    #[error("Party not found: {0}")]
    PartyNotFound(i32),

    /// Too many accounts already due in the requested month.
    #[error(transparent)]
    MonthlyLimitExceeded(#[from] MonthlyLimitExceeded),

    /// Creation kept colliding with concurrent writers; the caller may retry.
    #[error("Concurrent account creation conflict")]
    Conflict,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// PostgreSQL SQLSTATE for a SERIALIZABLE transaction that lost a race.
const SERIALIZATION_FAILURE: &str = "40001";

/// Account together with its linked party, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountWithParty {
    /// The account record.
    pub account: accounts::Model,
    /// Linked party.
    pub party: Option<parties::Model>,
}

impl From<(accounts::Model, Option<parties::Model>)> for AccountWithParty {
    fn from((account, party): (accounts::Model, Option<parties::Model>)) -> Self {
        Self { account, party }
    }
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Short description (3-30 characters).
    pub description: String,
    /// Amount, strictly positive.
    pub amount: Decimal,
    /// Payable or receivable.
    pub kind: AccountKind,
    /// Forecast date; drives the monthly limit.
    pub due_date: NaiveDate,
    /// Optional supplier/client.
    pub party_id: Option<i32>,
}

/// Input for updating an account. Every field is overwritten.
#[derive(Debug, Clone)]
pub struct UpdateAccountInput {
    /// Short description (3-30 characters).
    pub description: String,
    /// Amount, strictly positive.
    pub amount: Decimal,
    /// Payable or receivable.
    pub kind: AccountKind,
    /// Supplier/client; `None` unlinks the account.
    pub party_id: Option<i32>,
}

/// Account repository for CRUD, settlement and reporting.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account with validation.
    ///
    /// The monthly count and the insert share one transaction. On PostgreSQL
    /// it runs SERIALIZABLE so concurrent creations cannot overshoot the limit;
    /// a transaction that loses that race is retried once.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The referenced party does not exist
    /// - The due-date month already holds the maximum number of accounts
    /// - The retry also hit a serialization failure (`AccountError::Conflict`)
    pub async fn create(&self, input: CreateAccountInput) -> Result<AccountWithParty, AccountError> {
        match self.create_once(input.clone()).await {
            Err(AccountError::Database(err)) if is_serialization_failure(&err) => {
                warn!(due_date = %input.due_date, "Serialization failure creating account, retrying");
                self.create_once(input).await.map_err(|err| match err {
                    AccountError::Database(db) if is_serialization_failure(&db) => {
                        AccountError::Conflict
                    }
                    other => other,
                })
            }
            result => result,
        }
    }

    async fn create_once(&self, input: CreateAccountInput) -> Result<AccountWithParty, AccountError> {
        let isolation = match self.db.get_database_backend() {
            DbBackend::Postgres => Some(IsolationLevel::Serializable),
            _ => None,
        };
        let txn = self.db.begin_with_config(isolation, None).await?;

        let party = match input.party_id {
            Some(party_id) => Some(find_party(&txn, party_id).await?),
            None => None,
        };

        let (month_start, next_month) = month_bounds(input.due_date);
        let existing = accounts::Entity::find()
            .filter(accounts::Column::DueDate.gte(month_start))
            .filter(accounts::Column::DueDate.lt(next_month))
            .count(&txn)
            .await?;

        MonthlyLimit::default().check(input.due_date, existing)?;

        let account = accounts::ActiveModel {
            description: Set(input.description),
            amount: Set(input.amount),
            kind: Set(input.kind.into()),
            due_date: Set(input.due_date),
            settlement_date: Set(None),
            settled_amount: Set(None),
            is_settled: Set(false),
            party_id: Set(input.party_id),
            ..Default::default()
        };

        let account = account.insert(&txn).await?;
        txn.commit().await?;

        Ok(AccountWithParty { account, party })
    }

    /// Lists all accounts with their parties, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<AccountWithParty>, AccountError> {
        let rows = accounts::Entity::find()
            .find_also_related(parties::Entity)
            .order_by_asc(accounts::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(AccountWithParty::from).collect())
    }

    /// Gets an account with its party.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::AccountNotFound` if no account has this ID.
    pub async fn get(&self, id: i32) -> Result<AccountWithParty, AccountError> {
        accounts::Entity::find_by_id(id)
            .find_also_related(parties::Entity)
            .one(&self.db)
            .await?
            .map(AccountWithParty::from)
            .ok_or(AccountError::AccountNotFound(id))
    }

    /// Overwrites description, amount, kind and party of an account.
    ///
    /// The due date is immutable and the monthly limit is not re-checked.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Account not found
    /// - The referenced party does not exist
    pub async fn update(
        &self,
        id: i32,
        input: UpdateAccountInput,
    ) -> Result<AccountWithParty, AccountError> {
        let account = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::AccountNotFound(id))?;

        let party = match input.party_id {
            Some(party_id) => Some(find_party(&self.db, party_id).await?),
            None => None,
        };

        let mut active: accounts::ActiveModel = account.into();
        active.description = Set(input.description);
        active.amount = Set(input.amount);
        active.kind = Set(input.kind.into());
        active.party_id = Set(input.party_id);

        let account = active.update(&self.db).await?;
        Ok(AccountWithParty { account, party })
    }

    /// Settles an account as of today.
    ///
    /// See [`AccountRepository::settle_on`].
    ///
    /// # Errors
    ///
    /// Returns `AccountError::AccountNotFound` if no account has this ID.
    pub async fn settle(&self, id: i32) -> Result<AccountWithParty, AccountError> {
        self.settle_on(id, chrono::Utc::now().date_naive()).await
    }

    /// Settles an account with the given settlement date.
    ///
    /// Records the full amount as settled. An already settled account is
    /// returned unchanged and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::AccountNotFound` if no account has this ID.
    pub async fn settle_on(
        &self,
        id: i32,
        today: NaiveDate,
    ) -> Result<AccountWithParty, AccountError> {
        let AccountWithParty { account, party } = self.get(id).await?;

        let Some(settlement) = settle(account.is_settled, account.amount, today) else {
            return Ok(AccountWithParty { account, party });
        };

        let mut active: accounts::ActiveModel = account.into();
        active.settlement_date = Set(Some(settlement.settled_on));
        active.settled_amount = Set(Some(settlement.settled_amount));
        active.is_settled = Set(true);

        let account = active.update(&self.db).await?;
        Ok(AccountWithParty { account, party })
    }

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::AccountNotFound` if no account has this ID.
    pub async fn delete(&self, id: i32) -> Result<(), AccountError> {
        let account = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::AccountNotFound(id))?;

        account.delete(&self.db).await?;
        Ok(())
    }

    /// Sums payable amounts per due-date month of `year`.
    ///
    /// Receivables are excluded. Months without payables are omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn report_by_month(&self, year: i32) -> Result<Vec<MonthlyTotal>, AccountError> {
        let Some((year_start, next_year)) = ReportService::year_bounds(year) else {
            return Ok(Vec::new());
        };

        let payables = accounts::Entity::find()
            .filter(accounts::Column::Kind.eq(sea_orm_active_enums::AccountKind::Payable))
            .filter(accounts::Column::DueDate.gte(year_start))
            .filter(accounts::Column::DueDate.lt(next_year))
            .order_by_asc(accounts::Column::DueDate)
            .order_by_asc(accounts::Column::Id)
            .all(&self.db)
            .await?;

        Ok(ReportService::monthly_totals(
            payables.into_iter().map(|a| (a.due_date, a.amount)),
        ))
    }

    /// Lists the accounts linked to a party.
    ///
    /// Unknown parties yield an empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn accounts_for_party(
        &self,
        party_id: i32,
    ) -> Result<Vec<AccountWithParty>, AccountError> {
        let rows = accounts::Entity::find()
            .find_also_related(parties::Entity)
            .filter(accounts::Column::PartyId.eq(party_id))
            .order_by_asc(accounts::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(AccountWithParty::from).collect())
    }
}

/// Whether the database aborted the statement because of a SERIALIZABLE conflict.
fn is_serialization_failure(err: &DbErr) -> bool {
    match err {
        DbErr::Conn(RuntimeErr::SqlxError(e))
        | DbErr::Exec(RuntimeErr::SqlxError(e))
        | DbErr::Query(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .and_then(|db| db.code())
            .is_some_and(|code| code == SERIALIZATION_FAILURE),
        _ => false,
    }
}

/// Loads a party referenced by an account.
async fn find_party<C>(conn: &C, party_id: i32) -> Result<parties::Model, AccountError>
where
    C: ConnectionTrait,
{
    parties::Entity::find_by_id(party_id)
        .one(conn)
        .await?
        .ok_or(AccountError::PartyNotFound(party_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_errors_are_not_serialization_failures() {
        assert!(!is_serialization_failure(&DbErr::Custom("40001".to_string())));
        assert!(!is_serialization_failure(&DbErr::RecordNotFound(
            "accounts".to_string()
        )));
        assert!(!is_serialization_failure(&DbErr::Exec(RuntimeErr::Internal(
            "could not serialize access".to_string()
        ))));
    }
}
