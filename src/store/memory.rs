//! In-memory store.
//!
//! Holds keys and pizzas in insertion order behind [`parking_lot::RwLock`]s.
//! Semantics match [`PgStore`](super::PgStore), including the unique owner and
//! unique hash constraints on keys. Data is lost when the process exits.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use super::{KeyStore, PizzaStore, StoreError};
use crate::models::{
    api_key::ApiKey,
    pizza::{NewPizza, Pizza, PizzaChanges, PizzaFilter},
};

/// Cheaply cloneable in-memory store. All clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    keys: Arc<RwLock<Vec<ApiKey>>>,
    pizzas: Arc<RwLock<Vec<Pizza>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyStore for MemoryStore {
    async fn insert_key(&self, owner: &str, key_hash: &str) -> Result<ApiKey, StoreError> {
        let mut keys = self.keys.write();

        if keys.iter().any(|k| k.owner == owner) {
            return Err(StoreError::Duplicate("api key owner"));
        }
        if keys.iter().any(|k| k.key_hash == key_hash) {
            return Err(StoreError::Duplicate("api key hash"));
        }

        let now = Utc::now();
        let record = ApiKey {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            key_hash: key_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        keys.push(record.clone());

        Ok(record)
    }

    async fn replace_key(
        &self,
        owner: &str,
        key_hash: &str,
    ) -> Result<Option<ApiKey>, StoreError> {
        let mut keys = self.keys.write();

        if keys.iter().any(|k| k.key_hash == key_hash && k.owner != owner) {
            return Err(StoreError::Duplicate("api key hash"));
        }

        let Some(record) = keys.iter_mut().find(|k| k.owner == owner) else {
            return Ok(None);
        };
        record.key_hash = key_hash.to_string();
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn find_by_hash(&self, key_hash: &str) -> Result<Option<ApiKey>, StoreError> {
        Ok(self
            .keys
            .read()
            .iter()
            .find(|k| k.key_hash == key_hash)
            .cloned())
    }
}

#[async_trait]
impl PizzaStore for MemoryStore {
    async fn insert_pizza(&self, pizza: NewPizza) -> Result<Pizza, StoreError> {
        let now = Utc::now();
        let record = Pizza {
            id: Uuid::new_v4(),
            owner: pizza.owner,
            name: pizza.name,
            crust: pizza.crust,
            toppings: pizza.toppings,
            created_at: now,
            updated_at: now,
        };
        self.pizzas.write().push(record.clone());

        Ok(record)
    }

    async fn find_pizzas(
        &self,
        owner: &str,
        filter: &PizzaFilter,
    ) -> Result<Vec<Pizza>, StoreError> {
        Ok(self
            .pizzas
            .read()
            .iter()
            .filter(|p| p.owner == owner && filter.matches(p))
            .cloned()
            .collect())
    }

    async fn update_pizza(
        &self,
        id: Uuid,
        owner: &str,
        changes: &PizzaChanges,
    ) -> Result<bool, StoreError> {
        let mut pizzas = self.pizzas.write();

        let Some(pizza) = pizzas.iter_mut().find(|p| p.id == id && p.owner == owner) else {
            return Ok(false);
        };
        changes.apply_to(pizza);
        pizza.updated_at = Utc::now();

        Ok(true)
    }

    async fn delete_pizza(&self, id: Uuid, owner: &str) -> Result<bool, StoreError> {
        let mut pizzas = self.pizzas.write();
        let before = pizzas.len();
        pizzas.retain(|p| !(p.id == id && p.owner == owner));

        Ok(pizzas.len() != before)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_pizza(owner: &str, name: &str) -> NewPizza {
        NewPizza {
            owner: owner.to_string(),
            name: name.to_string(),
            crust: "thin".to_string(),
            toppings: vec!["basil".to_string()],
        }
    }

    #[tokio::test]
    async fn one_key_per_owner() {
        let store = MemoryStore::new();
        store.insert_key("alice", "hash-1").await.unwrap();

        let err = store.insert_key("alice", "hash-2").await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));

        let err = store.insert_key("bob", "hash-1").await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn replace_key_swaps_hash_in_place() {
        let store = MemoryStore::new();
        let original = store.insert_key("alice", "hash-1").await.unwrap();

        let replaced = store
            .replace_key("alice", "hash-2")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(replaced.id, original.id);
        assert!(store.find_by_hash("hash-1").await.unwrap().is_none());
        assert_eq!(
            store.find_by_hash("hash-2").await.unwrap().unwrap().owner,
            "alice"
        );
        assert!(store.replace_key("bob", "hash-3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn pizzas_are_scoped_to_owner() {
        let store = MemoryStore::new();
        let alices = store.insert_pizza(new_pizza("alice", "Margherita")).await.unwrap();
        store.insert_pizza(new_pizza("bob", "Hawaiian")).await.unwrap();

        let found = store
            .find_pizzas("alice", &PizzaFilter::default())
            .await
            .unwrap();
        assert_eq!(found, vec![alices.clone()]);

        let changes = PizzaChanges {
            name: Some("Stolen".to_string()),
            ..PizzaChanges::default()
        };
        assert!(!store.update_pizza(alices.id, "bob", &changes).await.unwrap());
        assert!(!store.delete_pizza(alices.id, "bob").await.unwrap());

        let found = store
            .find_pizzas("alice", &PizzaFilter::default())
            .await
            .unwrap();
        assert_eq!(found[0].name, "Margherita");
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_record() {
        let store = MemoryStore::new();
        let first = store.insert_pizza(new_pizza("alice", "One")).await.unwrap();
        let second = store.insert_pizza(new_pizza("alice", "Two")).await.unwrap();

        assert!(store.delete_pizza(first.id, "alice").await.unwrap());
        assert!(!store.delete_pizza(first.id, "alice").await.unwrap());

        let remaining = store
            .find_pizzas("alice", &PizzaFilter::default())
            .await
            .unwrap();
        assert_eq!(remaining, vec![second]);
    }
}
