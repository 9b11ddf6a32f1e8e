//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod accounts;
pub mod health;
pub mod parties;
pub mod party_accounts;

/// Creates the versioned API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(accounts::routes())
        .merge(parties::routes())
        .merge(party_accounts::routes())
}
