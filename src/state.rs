//! Shared application state.

use std::sync::Arc;

use crate::store::{KeyStore, PizzaStore};

/// Stores shared with every handler via axum `State`.
///
/// Built once at startup and cloned per request (only the `Arc`s are cloned).
#[derive(Clone)]
pub struct AppState {
    pub keys: Arc<dyn KeyStore>,
    pub pizzas: Arc<dyn PizzaStore>,
}

impl AppState {
    /// Use one store for both the key and pizza collections.
    pub fn new<S>(store: S) -> Self
    where
        S: KeyStore + PizzaStore + 'static,
    {
        let store = Arc::new(store);
        Self {
            keys: store.clone(),
            pizzas: store,
        }
    }
}
