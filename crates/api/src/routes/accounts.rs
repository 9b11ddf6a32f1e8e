//! Account routes: CRUD, settlement and the monthly payables report.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::{Validate, ValidationError};

use contas_core::account::{AccountKind, MonthlyTotal};
use contas_db::{AccountRepository, AccountWithParty, CreateAccountInput, UpdateAccountInput};

use crate::{AppState, error::ApiError, routes::parties::PartyResponse};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/monthly-report", get(monthly_report))
        .route(
            "/accounts/{account_id}",
            get(get_account).put(update_account).delete(delete_account),
        )
        .route("/accounts/{account_id}/settle", post(settle_account))
}

/// Request body for creating an account.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccountRequest {
    /// Short description.
    #[validate(length(min = 3, max = 30, message = "description must have 3 to 30 characters"))]
    pub description: String,
    /// Amount: positive, at most 2 decimals, below [`MAX_AMOUNT`].
    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,
    /// `payable` or `receivable`.
    pub kind: AccountKind,
    /// Forecast date.
    pub due_date: NaiveDate,
    /// Optional supplier/client.
    #[serde(default)]
    pub party_id: Option<i32>,
}

/// Request body for updating an account.
///
/// Every field is overwritten; omitting `party_id` unlinks the party.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    /// Short description.
    #[validate(length(min = 3, max = 30, message = "description must have 3 to 30 characters"))]
    pub description: String,
    /// Amount: positive, at most 2 decimals, below [`MAX_AMOUNT`].
    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,
    /// `payable` or `receivable`.
    pub kind: AccountKind,
    /// Supplier/client.
    #[serde(default)]
    pub party_id: Option<i32>,
}

/// Query parameters for the monthly report.
#[derive(Debug, Deserialize)]
pub struct MonthlyReportQuery {
    /// Calendar year to report on.
    pub year: i32,
}

/// Account as returned by the API.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: i32,
    /// Short description.
    pub description: String,
    /// Amount, serialized as a decimal string.
    pub amount: Decimal,
    /// `payable` or `receivable`.
    pub kind: AccountKind,
    /// Forecast date.
    pub due_date: NaiveDate,
    /// Date the account was settled.
    pub settlement_date: Option<NaiveDate>,
    /// Amount recorded at settlement.
    pub settled_amount: Option<Decimal>,
    /// Whether the account is settled.
    pub is_settled: bool,
    /// Linked party ID.
    pub party_id: Option<i32>,
    /// Linked party, resolved.
    pub party: Option<PartyResponse>,
}

impl From<AccountWithParty> for AccountResponse {
    fn from(AccountWithParty { account, party }: AccountWithParty) -> Self {
        Self {
            id: account.id,
            description: account.description,
            amount: account.amount,
            kind: account.kind.into(),
            due_date: account.due_date,
            settlement_date: account.settlement_date,
            settled_amount: account.settled_amount,
            is_settled: account.is_settled,
            party_id: account.party_id,
            party: party.map(PartyResponse::from),
        }
    }
}

/// Exclusive upper bound for amounts (12 integer digits).
///
/// Keeps every accepted amount inside `NUMERIC(14,2)` and exact as a SQLite REAL.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Maximum number of decimal places in an amount.
pub const AMOUNT_SCALE: u32 = 2;

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    let (code, message) = if !amount.is_sign_positive() || amount.is_zero() {
        ("positive", "amount must be greater than zero")
    } else if amount.normalize().scale() > AMOUNT_SCALE {
        ("scale", "amount must have at most 2 decimal places")
    } else if *amount >= MAX_AMOUNT {
        ("range", "amount must be less than 1000000000000")
    } else {
        return Ok(());
    };

    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    Err(err)
}

/// GET /accounts - List all accounts.
async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountResponse>>, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());
    let accounts = repo.list().await?;
    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}

/// POST /accounts - Create an account.
async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let repo = AccountRepository::new((*state.db).clone());
    let created = repo
        .create(CreateAccountInput {
            description: payload.description,
            amount: payload.amount,
            kind: payload.kind,
            due_date: payload.due_date,
            party_id: payload.party_id,
        })
        .await?;

    info!(
        account_id = created.account.id,
        kind = %payload.kind,
        due_date = %payload.due_date,
        "Account created"
    );

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// GET /accounts/{account_id} - Get one account.
async fn get_account(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<AccountResponse>, ApiError> {
    let Path(account_id) = path?;
    let repo = AccountRepository::new((*state.db).clone());
    Ok(Json(repo.get(account_id).await?.into()))
}

/// PUT /accounts/{account_id} - Overwrite an account.
async fn update_account(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, ApiError> {
    let Path(account_id) = path?;
    let Json(payload) = payload?;
    payload.validate()?;

    let repo = AccountRepository::new((*state.db).clone());
    let updated = repo
        .update(
            account_id,
            UpdateAccountInput {
                description: payload.description,
                amount: payload.amount,
                kind: payload.kind,
                party_id: payload.party_id,
            },
        )
        .await?;

    info!(account_id, "Account updated");
    Ok(Json(updated.into()))
}

/// POST /accounts/{account_id}/settle - Mark an account as settled.
async fn settle_account(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<AccountResponse>, ApiError> {
    let Path(account_id) = path?;
    let repo = AccountRepository::new((*state.db).clone());
    let settled = repo.settle(account_id).await?;

    info!(account_id, settlement_date = ?settled.account.settlement_date, "Account settled");
    Ok(Json(settled.into()))
}

/// DELETE /accounts/{account_id} - Delete an account.
async fn delete_account(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(account_id) = path?;
    let repo = AccountRepository::new((*state.db).clone());
    repo.delete(account_id).await?;

    info!(account_id, "Account deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /accounts/monthly-report?year=Y - Payable totals per month.
async fn monthly_report(
    State(state): State<AppState>,
    query: Result<Query<MonthlyReportQuery>, QueryRejection>,
) -> Result<Json<Vec<MonthlyTotal>>, ApiError> {
    let Query(query) = query?;
    let repo = AccountRepository::new((*state.db).clone());
    Ok(Json(repo.report_by_month(query.year).await?))
}
