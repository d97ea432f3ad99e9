//! # Routes
//!
//! Axum router configuration for the platform API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Accounts:
///   - POST /register - Register customer, restaurant owner or admin
///   - POST /login - Check credentials, return the identity
///
/// - Administration:
///   - POST /update-promote-list - Replace promoted restaurants
///   - POST /approve-user - Approve an identity
///   - POST /reject-user - Reject an identity
///   - GET  /fetch-users - List identities
///
/// - Restaurants & cart:
///   - GET  /fetch-restaurants - List restaurants
///   - POST /add-to-cart - Append a cart line item
///   - GET  /fetch-cart/{user_id} - A customer's cart
pub fn create_router(state: AppState) -> Router {
    // Clients are served from other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = DefaultBodyLimit::max(state.config.max_body_bytes);

    let account_routes = Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login));

    let admin_routes = Router::new()
        .route("/update-promote-list", post(handlers::update_promote_list))
        .route("/approve-user", post(handlers::approve_user))
        .route("/reject-user", post(handlers::reject_user))
        .route("/fetch-users", get(handlers::fetch_users));

    let catalog_routes = Router::new()
        .route("/fetch-restaurants", get(handlers::fetch_restaurants))
        .route("/add-to-cart", post(handlers::add_to_cart))
        .route("/fetch-cart/{user_id}", get(handlers::fetch_cart));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(account_routes)
        .merge(admin_routes)
        .merge(catalog_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(body_limit),
        )
        .with_state(state)
}
