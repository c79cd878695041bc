//! Document store abstraction.
//!
//! Handlers and services talk to the key and pizza collections through the
//! [`KeyStore`] and [`PizzaStore`] traits. Two implementations exist:
//!
//! - [`PgStore`]: PostgreSQL through sqlx, used by the server binary
//! - [`MemoryStore`]: in-process vectors, used by tests
//!
//! Every operation touches a single record and is atomic on its own. Nothing
//! spans several records.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    api_key::ApiKey,
    pizza::{NewPizza, Pizza, PizzaChanges, PizzaFilter},
};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors raised by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database rejected or failed the operation.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A unique field would be duplicated (e.g. a second key for one owner).
    #[error("duplicate {0}")]
    Duplicate(&'static str),
}

/// Collection of API keys, one per owner.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Insert a key for `owner`.
    ///
    /// Fails with [`StoreError::Duplicate`] (or the database's unique
    /// violation) if the owner already has a key or the hash is taken.
    async fn insert_key(&self, owner: &str, key_hash: &str) -> Result<ApiKey, StoreError>;

    /// Replace the key hash of `owner` in place.
    ///
    /// Returns `None` when the owner has no key yet.
    async fn replace_key(&self, owner: &str, key_hash: &str)
    -> Result<Option<ApiKey>, StoreError>;

    /// Look up the key record holding `key_hash`.
    async fn find_by_hash(&self, key_hash: &str) -> Result<Option<ApiKey>, StoreError>;
}

/// Collection of pizzas. Every read and write is scoped to an owner.
#[async_trait]
pub trait PizzaStore: Send + Sync {
    /// Insert a pizza and return the stored record.
    async fn insert_pizza(&self, pizza: NewPizza) -> Result<Pizza, StoreError>;

    /// All pizzas of `owner` matching `filter`, oldest first.
    async fn find_pizzas(&self, owner: &str, filter: &PizzaFilter)
    -> Result<Vec<Pizza>, StoreError>;

    /// Apply `changes` to the pizza `id` owned by `owner`.
    ///
    /// Returns `false`, without mutating anything, if no such pizza exists.
    async fn update_pizza(
        &self,
        id: Uuid,
        owner: &str,
        changes: &PizzaChanges,
    ) -> Result<bool, StoreError>;

    /// Remove the pizza `id` owned by `owner`. Returns `false` if absent.
    async fn delete_pizza(&self, id: Uuid, owner: &str) -> Result<bool, StoreError>;

    /// Verify the store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}
