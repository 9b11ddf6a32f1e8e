//! Party (supplier/client) repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait, sea_query::Expr,
};
use tracing::debug;

use crate::entities::{accounts, parties};

/// Error types for party operations.
#[derive(Debug, thiserror::Error)]
pub enum PartyError {
    /// Party not found.
    #[error("Party not found: {0}")]
    NotFound(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Party repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct PartyRepository {
    db: DatabaseConnection,
}

impl PartyRepository {
    /// Creates a new party repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a party. Names are not required to be unique.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, name: String) -> Result<parties::Model, PartyError> {
        let party = parties::ActiveModel {
            name: Set(name),
            ..Default::default()
        };

        Ok(party.insert(&self.db).await?)
    }

    /// Lists all parties ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<parties::Model>, PartyError> {
        Ok(parties::Entity::find()
            .order_by_asc(parties::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Gets a party by ID.
    ///
    /// # Errors
    ///
    /// Returns `PartyError::NotFound` if no party has this ID.
    pub async fn get(&self, id: i32) -> Result<parties::Model, PartyError> {
        parties::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PartyError::NotFound(id))
    }

    /// Renames a party.
    ///
    /// # Errors
    ///
    /// Returns `PartyError::NotFound` if no party has this ID.
    pub async fn update(&self, id: i32, name: String) -> Result<parties::Model, PartyError> {
        let party = self.get(id).await?;

        let mut active: parties::ActiveModel = party.into();
        active.name = Set(name);

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a party.
    ///
    /// Accounts linked to the party are kept and unlinked (`party_id` set to
    /// NULL) in the same transaction as the delete.
    ///
    /// # Errors
    ///
    /// Returns `PartyError::NotFound` if no party has this ID.
    pub async fn delete(&self, id: i32) -> Result<(), PartyError> {
        let party = self.get(id).await?;

        let txn = self.db.begin().await?;

        let unlinked = accounts::Entity::update_many()
            .col_expr(accounts::Column::PartyId, Expr::value(Option::<i32>::None))
            .filter(accounts::Column::PartyId.eq(id))
            .exec(&txn)
            .await?;

        party.delete(&txn).await?;
        txn.commit().await?;

        debug!(
            party_id = id,
            unlinked_accounts = unlinked.rows_affected,
            "Party removed"
        );

        Ok(())
    }
}
