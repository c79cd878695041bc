//! PostgreSQL store backed by the sqlx connection pool.
//!
//! Tables are created by the migrations in `migrations/`. Unique constraints
//! on `api_keys.owner` and `api_keys.key_hash` enforce one key per owner and
//! one owner per key; the database error is passed through unchanged.

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::{KeyStore, PizzaStore, StoreError};
use crate::{
    db::DbPool,
    models::{
        api_key::ApiKey,
        pizza::{NewPizza, Pizza, PizzaChanges, PizzaFilter},
    },
};

const PIZZA_COLUMNS: &str = "id, owner, name, crust, toppings, created_at, updated_at";

/// Store implementation over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyStore for PgStore {
    async fn insert_key(&self, owner: &str, key_hash: &str) -> Result<ApiKey, StoreError> {
        let key = sqlx::query_as::<_, ApiKey>(
            r#"
            INSERT INTO api_keys (id, owner, key_hash)
            VALUES ($1, $2, $3)
            RETURNING id, owner, key_hash, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(key_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(key)
    }

    async fn replace_key(
        &self,
        owner: &str,
        key_hash: &str,
    ) -> Result<Option<ApiKey>, StoreError> {
        let key = sqlx::query_as::<_, ApiKey>(
            r#"
            UPDATE api_keys
            SET key_hash = $1,
                updated_at = NOW()
            WHERE owner = $2
            RETURNING id, owner, key_hash, created_at, updated_at
            "#,
        )
        .bind(key_hash)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(key)
    }

    async fn find_by_hash(&self, key_hash: &str) -> Result<Option<ApiKey>, StoreError> {
        let key = sqlx::query_as::<_, ApiKey>(
            "SELECT id, owner, key_hash, created_at, updated_at
             FROM api_keys
             WHERE key_hash = $1",
        )
        .bind(key_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(key)
    }
}

#[async_trait]
impl PizzaStore for PgStore {
    async fn insert_pizza(&self, pizza: NewPizza) -> Result<Pizza, StoreError> {
        let pizza = sqlx::query_as::<_, Pizza>(&format!(
            r#"
            INSERT INTO pizzas (id, owner, name, crust, toppings)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PIZZA_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(pizza.owner)
        .bind(pizza.name)
        .bind(pizza.crust)
        .bind(pizza.toppings)
        .fetch_one(&self.pool)
        .await?;

        Ok(pizza)
    }

    async fn find_pizzas(
        &self,
        owner: &str,
        filter: &PizzaFilter,
    ) -> Result<Vec<Pizza>, StoreError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PIZZA_COLUMNS} FROM pizzas WHERE owner = "
        ));
        query.push_bind(owner.to_string());

        if let Some(id) = filter.id {
            query.push(" AND id = ").push_bind(id);
        }
        if let Some(name) = &filter.name {
            query.push(" AND name = ").push_bind(name.clone());
        }
        if let Some(crust) = &filter.crust {
            query.push(" AND crust = ").push_bind(crust.clone());
        }
        // Array equality: same elements in the same order
        if let Some(toppings) = &filter.toppings {
            query.push(" AND toppings = ").push_bind(toppings.clone());
        }
        query.push(" ORDER BY created_at ASC, id ASC");

        let pizzas = query
            .build_query_as::<Pizza>()
            .fetch_all(&self.pool)
            .await?;

        Ok(pizzas)
    }

    async fn update_pizza(
        &self,
        id: Uuid,
        owner: &str,
        changes: &PizzaChanges,
    ) -> Result<bool, StoreError> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE pizzas SET updated_at = NOW()");

        if let Some(name) = &changes.name {
            query.push(", name = ").push_bind(name.clone());
        }
        if let Some(crust) = &changes.crust {
            query.push(", crust = ").push_bind(crust.clone());
        }
        if let Some(toppings) = &changes.toppings {
            query.push(", toppings = ").push_bind(toppings.clone());
        }
        query
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" AND owner = ")
            .push_bind(owner.to_string());

        let updated = query.build().execute(&self.pool).await?.rows_affected();

        Ok(updated > 0)
    }

    async fn delete_pizza(&self, id: Uuid, owner: &str) -> Result<bool, StoreError> {
        let deleted = sqlx::query("DELETE FROM pizzas WHERE id = $1 AND owner = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
