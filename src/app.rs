//! HTTP front door: routes, authentication and CORS.

use axum::{Router, middleware as axum_middleware, routing::get};
use tower_http::trace::TraceLayer;

use crate::{handlers, middleware, state::AppState};

/// Path of the pizza resource.
pub const PIZZA_PATH: &str = "/api/v1/pizza";

/// Build the application router.
///
/// - `/api/v1/pizza` GET/POST/PUT/DELETE require a valid API key
/// - `/health` is public
/// - `OPTIONS` on any path is answered by the CORS middleware before routing
pub fn router(state: AppState) -> Router {
    let authenticated_routes = Router::new()
        .route(
            PIZZA_PATH,
            get(handlers::pizza::list_pizzas)
                .post(handlers::pizza::create_pizza)
                .put(handlers::pizza::update_pizza)
                .delete(handlers::pizza::delete_pizza),
        )
        // Only runs for requests that matched a route above
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(authenticated_routes)
        .layer(axum_middleware::from_fn(middleware::cors::cors_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
