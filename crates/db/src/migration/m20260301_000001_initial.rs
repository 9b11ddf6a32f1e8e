//! Initial database migration.
//!
//! Creates the `parties` and `accounts` tables. Built with the schema builder
//! so the same migration runs on PostgreSQL and SQLite.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Parties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Parties::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Parties::Name).string_len(255).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::Description).string_len(30).not_null())
                    .col(money_column(manager, Accounts::Amount).not_null())
                    .col(ColumnDef::new(Accounts::Kind).string_len(30).not_null())
                    .col(ColumnDef::new(Accounts::DueDate).date().not_null())
                    .col(ColumnDef::new(Accounts::SettlementDate).date().null())
                    .col(money_column(manager, Accounts::SettledAmount).null())
                    .col(
                        ColumnDef::new(Accounts::IsSettled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Accounts::PartyId).integer().null())
                    .check(Expr::col(Accounts::Amount).gt(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accounts_party_id")
                            .from(Accounts::Table, Accounts::PartyId)
                            .to(Parties::Table, Parties::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Monthly limit counts and the expense report both scan by due date
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_accounts_due_date")
                    .table(Accounts::Table)
                    .col(Accounts::DueDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_accounts_party_id")
                    .table(Accounts::Table)
                    .col(Accounts::PartyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Accounts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Parties::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

/// Fixed-point money column. SQLite has no fixed-point storage, so amounts
/// are kept with REAL affinity there.
fn money_column(manager: &SchemaManager, column: Accounts) -> ColumnDef {
    let mut def = ColumnDef::new(column);
    match manager.get_database_backend() {
        DatabaseBackend::Sqlite => def.double(),
        _ => def.decimal_len(14, 2),
    };
    def
}

#[derive(DeriveIden)]
enum Parties {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    Description,
    Amount,
    Kind,
    DueDate,
    SettlementDate,
    SettledAmount,
    IsSettled,
    PartyId,
}
