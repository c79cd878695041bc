//! Pizza HTTP handlers.
//!
//! This module implements the pizza resource, all on `/api/v1/pizza`:
//! - GET - List the caller's pizzas, optionally filtered by exact match
//! - POST - Create a pizza owned by the caller
//! - PUT - Replace some fields of one of the caller's pizzas
//! - DELETE - Remove one of the caller's pizzas
//!
//! GET reads its parameters from the query string; the other verbs read a
//! JSON body. Every store call is scoped to the owner resolved from the API
//! key.

use axum::{
    Extension, Json,
    body::Bytes,
    extract::{RawQuery, State},
};
use uuid::Uuid;

use crate::{
    error::AppError,
    handlers::payload,
    middleware::auth::AuthContext,
    models::pizza::{
        CreatePizzaRequest, DeletePizzaRequest, MessageResponse, Pizza, PizzaCreatedResponse,
        PizzaFilter, PizzaQuery, UpdatePizzaRequest,
    },
    state::AppState,
};

const CREATE_SHAPE: &str = "POST calls must have a name, crust, and toppings passed in the request body in the correct formats.";
const UPDATE_SHAPE: &str = "PUT calls must have a pizza ID and at least a name, crust, or toppings passed in the request body in the correct formats (String, String, Array).";
const DELETE_SHAPE: &str = "DELETE calls must have an _id (and only an _id) in the request body in the correct format (String).";

const NO_MATCHES: &str = "No pizzas found.";
const UPDATE_MISSING: &str = "Can't update a non-existent pizza.";
const DELETE_MISSING: &str = "Can't delete a non-existent pizza.";

/// List or search pizzas.
///
/// # Endpoint
///
/// `GET /api/v1/pizza?name=Margherita&toppings=basil&toppings=mozzarella`
///
/// # Behavior
///
/// - No parameters: every pizza of the caller, 200 (possibly `[]`)
/// - Parameters: exact-match filter on `_id`, `name`, `crust` and the full
///   ordered `toppings` list; any `owner` parameter is replaced by the
///   caller. 404 when nothing matches.
pub async fn list_pizzas(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Pizza>>, AppError> {
    let pairs = url::form_urlencoded::parse(query.as_deref().unwrap_or_default().as_bytes());

    let filter = match PizzaQuery::from_pairs(pairs) {
        PizzaQuery::All => {
            let pizzas = state
                .pizzas
                .find_pizzas(&auth.owner, &PizzaFilter::default())
                .await?;
            return Ok(Json(pizzas));
        }
        PizzaQuery::Filter(filter) => filter,
        PizzaQuery::Unmatchable => return Err(AppError::NotFound(NO_MATCHES)),
    };

    let pizzas = state.pizzas.find_pizzas(&auth.owner, &filter).await?;

    if pizzas.is_empty() {
        return Err(AppError::NotFound(NO_MATCHES));
    }

    Ok(Json(pizzas))
}

/// Create a pizza.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Margherita",
///   "crust": "thin",
///   "toppings": ["basil", "mozzarella"]
/// }
/// ```
///
/// An `owner` field, if present, is discarded: the owner is always the
/// caller.
///
/// # Response (200)
///
/// ```json
/// {
///   "_id": "550e8400-e29b-41d4-a716-446655440000",
///   "message": "Pizza successfully created!"
/// }
/// ```
pub async fn create_pizza(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    body: Bytes,
) -> Result<Json<PizzaCreatedResponse>, AppError> {
    let object = payload::parse_object(&body, CREATE_SHAPE, &["owner"])?;
    let request: CreatePizzaRequest = payload::into_shape(object, CREATE_SHAPE)?;

    let pizza = state
        .pizzas
        .insert_pizza(request.into_new_pizza(&auth.owner))
        .await?;

    tracing::info!(owner = %auth.owner, pizza_id = %pizza.id, "pizza created");

    Ok(Json(PizzaCreatedResponse {
        id: pizza.id,
        message: "Pizza successfully created!",
    }))
}

/// Update some fields of a pizza.
///
/// # Request Body
///
/// `_id` plus any non-empty subset of `name`, `crust`, `toppings`:
///
/// ```json
/// {
///   "_id": "550e8400-e29b-41d4-a716-446655440000",
///   "toppings": ["pineapple"]
/// }
/// ```
///
/// # Security
///
/// The pizza is looked up by id AND owner, so a pizza belonging to someone
/// else is reported as missing and left untouched.
pub async fn update_pizza(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let request: UpdatePizzaRequest = payload::parse(&body, UPDATE_SHAPE)?;
    let (id, changes) = request
        .into_changes()
        .ok_or(AppError::InvalidPayload(UPDATE_SHAPE))?;

    let Ok(id) = Uuid::parse_str(&id) else {
        return Err(AppError::NotFound(UPDATE_MISSING));
    };

    if !state
        .pizzas
        .update_pizza(id, &auth.owner, &changes)
        .await?
    {
        return Err(AppError::NotFound(UPDATE_MISSING));
    }

    tracing::info!(owner = %auth.owner, pizza_id = %id, "pizza updated");

    Ok(Json(MessageResponse {
        message: "Pizza successfully updated!",
    }))
}

/// Delete a pizza.
///
/// # Request Body
///
/// ```json
/// { "_id": "550e8400-e29b-41d4-a716-446655440000" }
/// ```
pub async fn delete_pizza(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let request: DeletePizzaRequest = payload::parse(&body, DELETE_SHAPE)?;

    let Ok(id) = Uuid::parse_str(&request.id) else {
        return Err(AppError::NotFound(DELETE_MISSING));
    };

    if !state.pizzas.delete_pizza(id, &auth.owner).await? {
        return Err(AppError::NotFound(DELETE_MISSING));
    }

    tracing::info!(owner = %auth.owner, pizza_id = %id, "pizza deleted");

    Ok(Json(MessageResponse {
        message: "Pizza removed!",
    }))
}
