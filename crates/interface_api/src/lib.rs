//! HTTP API Layer
//!
//! REST surface of the lost-and-found service using Axum. Every route under
//! `/api/v1` maps onto one `LostFoundGateway` operation.
//!
//! # Architecture
//!
//! - **Handlers**: unpack requests and call the gateway
//! - **Middleware**: bearer token to `Session`, audit logging
//! - **DTOs**: request bodies with `validator` rules, list query parameters
//! - **Error Handling**: `CoreError` to status code and `{error, message}` body
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let gateway = LostFoundGateway::new(items, claims);
//! let app = create_router(gateway, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use axum::{
    Router,
    routing::{get, put},
    middleware as axum_middleware,
};
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use gateway::LostFoundGateway;

use crate::config::ApiConfig;
use crate::middleware::{session_middleware, audit_middleware};
use crate::handlers::{items, claims, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub gateway: LostFoundGateway,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `gateway` - Gateway over the item and claim ports
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(gateway: LostFoundGateway, config: ApiConfig) -> Router {
    let state = AppState { gateway, config };

    // Public routes (no session)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Found item routes
    let item_routes = Router::new()
        .route("/", get(items::list_public_items).post(items::create_item))
        .route("/staff/all", get(items::list_staff_items))
        .route("/staff/:id", get(items::get_staff_item))
        .route(
            "/:id",
            get(items::get_public_item)
                .put(items::update_item)
                .delete(items::delete_item),
        );

    // Claim routes
    let claim_routes = Router::new()
        .route("/", get(claims::list_claims).post(claims::create_claim))
        .route(
            "/:id",
            get(claims::get_claim)
                .put(claims::update_claim)
                .delete(claims::delete_claim),
        )
        .route("/:id/review", put(claims::review_claim))
        .route("/:id/pickup", put(claims::complete_pickup));

    // Session-aware API routes; each operation decides whether a guest may proceed
    let api_routes = Router::new()
        .nest("/found-items", item_routes)
        .nest("/claims", claim_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), session_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
