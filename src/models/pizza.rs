//! Pizza data models and API request/response types.
//!
//! This module defines:
//! - `Pizza`: Stored pizza record
//! - `CreatePizzaRequest`, `UpdatePizzaRequest`, `DeletePizzaRequest`: the only
//!   accepted payload shapes for POST, PUT and DELETE
//! - `PizzaQuery` / `PizzaFilter`: exact-match filters for GET
//! - Response bodies returned to clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a pizza record from the store.
///
/// # Database Table
///
/// Maps to the `pizzas` table. Each pizza belongs to one owner, and every
/// query issued by the handlers is scoped to the authenticated owner.
///
/// # JSON Example
///
/// ```json
/// {
///   "_id": "550e8400-e29b-41d4-a716-446655440000",
///   "owner": "user-1",
///   "name": "Margherita",
///   "crust": "thin",
///   "toppings": ["basil", "mozzarella"],
///   "created_at": "2025-12-20T10:00:00Z",
///   "updated_at": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Pizza {
    /// Unique identifier for this pizza
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// User identifier stamped from the API key that created the pizza
    pub owner: String,

    pub name: String,

    pub crust: String,

    /// Toppings in the order they were supplied
    pub toppings: Vec<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// A pizza about to be inserted, with its owner already stamped.
#[derive(Debug, Clone)]
pub struct NewPizza {
    pub owner: String,
    pub name: String,
    pub crust: String,
    pub toppings: Vec<String>,
}

/// Request body for creating a pizza.
///
/// All three fields are required and nothing else is accepted.
///
/// ```json
/// {
///   "name": "Margherita",
///   "crust": "thin",
///   "toppings": ["basil", "mozzarella"]
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePizzaRequest {
    pub name: String,
    pub crust: String,
    pub toppings: Vec<String>,
}

impl CreatePizzaRequest {
    /// Stamp the authenticated owner onto the request.
    pub fn into_new_pizza(self, owner: &str) -> NewPizza {
        NewPizza {
            owner: owner.to_string(),
            name: self.name,
            crust: self.crust,
            toppings: self.toppings,
        }
    }
}

/// Request body for a partial update.
///
/// `_id` is required together with at least one of `name`, `crust` or
/// `toppings`. Fields that are left out keep their stored value.
///
/// ```json
/// {
///   "_id": "550e8400-e29b-41d4-a716-446655440000",
///   "crust": "deep dish"
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePizzaRequest {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub crust: Option<String>,

    #[serde(default)]
    pub toppings: Option<Vec<String>>,
}

impl UpdatePizzaRequest {
    /// Split the request into the target id and the fields to replace.
    ///
    /// Returns `None` when no field would change.
    pub fn into_changes(self) -> Option<(String, PizzaChanges)> {
        let changes = PizzaChanges {
            name: self.name,
            crust: self.crust,
            toppings: self.toppings,
        };

        if changes.is_empty() {
            None
        } else {
            Some((self.id, changes))
        }
    }
}

/// Fields replaced by an update. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PizzaChanges {
    pub name: Option<String>,
    pub crust: Option<String>,
    pub toppings: Option<Vec<String>>,
}

impl PizzaChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.crust.is_none() && self.toppings.is_none()
    }

    /// Merge the included fields into `pizza`.
    pub fn apply_to(&self, pizza: &mut Pizza) {
        if let Some(name) = &self.name {
            pizza.name = name.clone();
        }
        if let Some(crust) = &self.crust {
            pizza.crust = crust.clone();
        }
        if let Some(toppings) = &self.toppings {
            pizza.toppings = toppings.clone();
        }
    }
}

/// Request body for deleting a pizza. Exactly one field, `_id`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeletePizzaRequest {
    #[serde(rename = "_id")]
    pub id: String,
}

/// Exact-match filter for reading pizzas.
///
/// Every `Some` field must be equal to the stored value. `toppings` compares
/// the whole ordered list, so `["basil"]` does not match a pizza topped with
/// `["basil", "mozzarella"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PizzaFilter {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub crust: Option<String>,
    pub toppings: Option<Vec<String>>,
}

impl PizzaFilter {
    pub fn matches(&self, pizza: &Pizza) -> bool {
        self.id.is_none_or(|id| pizza.id == id)
            && self.name.as_ref().is_none_or(|name| &pizza.name == name)
            && self.crust.as_ref().is_none_or(|crust| &pizza.crust == crust)
            && self
                .toppings
                .as_ref()
                .is_none_or(|toppings| &pizza.toppings == toppings)
    }
}

/// What a GET request asks for, derived from its query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PizzaQuery {
    /// No parameters: list every pizza of the owner.
    All,

    /// Exact-match filter, always scoped to the owner.
    Filter(PizzaFilter),

    /// The parameters can never match a stored pizza (unknown field,
    /// malformed id, repeated scalar).
    Unmatchable,
}

impl PizzaQuery {
    /// Build a query from decoded `key=value` pairs.
    ///
    /// `toppings` (or `toppings[]`) may repeat to form the list. Any `owner`
    /// parameter is ignored because the owner always comes from the API key.
    /// A value containing NUL can never match.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut filter = PizzaFilter::default();
        let mut has_data = false;

        for (key, value) in pairs {
            has_data = true;
            let value = value.into();

            // Stored text never contains NUL
            if value.contains('\0') {
                return Self::Unmatchable;
            }

            match key.as_ref() {
                "owner" => {}
                "_id" => {
                    let Ok(id) = Uuid::parse_str(&value) else {
                        return Self::Unmatchable;
                    };
                    if filter.id.replace(id).is_some() {
                        return Self::Unmatchable;
                    }
                }
                "name" => {
                    if filter.name.replace(value).is_some() {
                        return Self::Unmatchable;
                    }
                }
                "crust" => {
                    if filter.crust.replace(value).is_some() {
                        return Self::Unmatchable;
                    }
                }
                "toppings" | "toppings[]" => {
                    filter.toppings.get_or_insert_with(Vec::new).push(value);
                }
                _ => return Self::Unmatchable,
            }
        }

        if has_data {
            Self::Filter(filter)
        } else {
            Self::All
        }
    }
}

/// Response body for a successful create.
#[derive(Debug, Serialize)]
pub struct PizzaCreatedResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,

    pub message: &'static str,
}

/// Response body for operations that only report an outcome.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
