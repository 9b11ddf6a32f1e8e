//! Database seeder for development and testing.
//!
//! Seeds a few suppliers/clients and a year of sample bills so the monthly
//! report has something to show. Parties are reused by name on later runs;
//! accounts are created again until a month reaches its limit.
//!
//! Uses the same configuration as the server (`config/`, `CONTAS__*`).
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

use contas_core::account::AccountKind;
use contas_db::{
    AccountError, AccountRepository, CreateAccountInput, PartyRepository, entities::parties,
};
use contas_shared::AppConfig;

/// Sample bill: description, amount in cents, kind, month, day, party name.
type SampleAccount = (&'static str, i64, AccountKind, u32, u32, Option<&'static str>);

const PARTIES: &[&str] = &[
    "Companhia de Luz",
    "Saneamento Municipal",
    "Operadora Telecom",
    "Empresa Empregadora",
];

const ACCOUNTS: &[SampleAccount] = &[
    ("Conta de Luz", 10_000, AccountKind::Payable, 1, 10, Some("Companhia de Luz")),
    ("Conta de Agua", 5_000, AccountKind::Payable, 1, 15, Some("Saneamento Municipal")),
    ("Salario", 500_000, AccountKind::Receivable, 1, 5, Some("Empresa Empregadora")),
    ("Internet", 20_000, AccountKind::Payable, 3, 10, Some("Operadora Telecom")),
    ("Telefone", 15_000, AccountKind::Payable, 3, 20, Some("Operadora Telecom")),
    ("Aluguel", 500_000, AccountKind::Payable, 2, 5, None),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to database...");
    let db = contas_db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding parties...");
    let parties = seed_parties(&PartyRepository::new(db.clone())).await?;

    println!("Seeding accounts...");
    seed_accounts(&AccountRepository::new(db), &parties).await?;

    println!("Seeding complete!");
    Ok(())
}

/// Creates the sample parties that do not exist yet.
async fn seed_parties(repo: &PartyRepository) -> anyhow::Result<Vec<parties::Model>> {
    let mut existing = repo.list().await?;

    for name in PARTIES {
        if existing.iter().any(|p| p.name == *name) {
            println!("  Party '{name}' already exists, skipping");
            continue;
        }
        let party = repo.create((*name).to_string()).await?;
        println!("  Created party '{}' (id {})", party.name, party.id);
        existing.push(party);
    }

    Ok(existing)
}

/// Creates the sample accounts in the current year.
async fn seed_accounts(repo: &AccountRepository, parties: &[parties::Model]) -> anyhow::Result<()> {
    let year = Utc::now().year();

    for &(description, cents, kind, month, day, party_name) in ACCOUNTS {
        let due_date = NaiveDate::from_ymd_opt(year, month, day)
            .with_context(|| format!("Invalid sample date {year}-{month:02}-{day:02}"))?;
        let party_id = party_name
            .and_then(|name| parties.iter().find(|p| p.name == name))
            .map(|p| p.id);

        let input = CreateAccountInput {
            description: description.to_string(),
            amount: Decimal::new(cents, 2),
            kind,
            due_date,
            party_id,
        };

        match repo.create(input).await {
            Ok(created) => {
                println!("  Created '{description}' due {due_date} (id {})", created.account.id);
            }
            Err(AccountError::MonthlyLimitExceeded(e)) => {
                println!("  Skipping '{description}': {e}");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
