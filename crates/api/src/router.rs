use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{auth_handlers, middleware as auth_middleware, order_handlers, AppState};

pub fn router(state: Arc<AppState>) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/", get(|| async { "mensa API running" }))
        .route("/orders", get(order_handlers::list_orders))
        .route("/orders/{id}", get(order_handlers::get_order))
        .route("/orders/{id}/complete", put(order_handlers::complete_order))
        .route("/menuitems", get(order_handlers::list_menu_items))
        .route("/login", post(auth_handlers::login))
        .route("/register", post(auth_handlers::register));

    // Protected routes (require a valid bearer token)
    let protected_routes = Router::new()
        .route("/order", post(order_handlers::place_order))
        .route("/users/profile", get(auth_handlers::profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
