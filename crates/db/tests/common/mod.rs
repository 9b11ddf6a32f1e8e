//! Shared helpers for repository integration tests.

use contas_shared::DatabaseConfig;
use sea_orm::DatabaseConnection;

/// Connects to a fresh in-memory SQLite database with the schema applied.
///
/// The pool holds exactly one connection: every SQLite in-memory connection
/// is its own database.
pub async fn setup_db() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        run_migrations: true,
    };

    let db = contas_db::connect(&config)
        .await
        .expect("Failed to connect to database");
    contas_db::migrate(&db)
        .await
        .expect("Failed to run migrations");
    db
}
