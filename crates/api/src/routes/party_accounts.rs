//! Accounts linked to a party.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    routing::get,
};

use contas_db::AccountRepository;

use crate::{AppState, error::ApiError, routes::accounts::AccountResponse};

/// Creates the party-accounts route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/parties/{party_id}/accounts", get(list_party_accounts))
}

/// GET /parties/{party_id}/accounts - Accounts referencing a party.
///
/// An unknown party yields an empty list.
async fn list_party_accounts(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<AccountResponse>>, ApiError> {
    let Path(party_id) = path?;
    let repo = AccountRepository::new((*state.db).clone());
    let accounts = repo.accounts_for_party(party_id).await?;
    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}
