//! Mix Production Server
//!
//! REST JSON API for a small manufacturing floor: equipment stock
//! counters, the production journal that drives them, stock movements
//! and the MAC separation queue.

use std::sync::Arc;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.origin);

    let api_routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Equipment
        .route(
            "/equipment",
            get(api::equipment::list_equipment).post(api::equipment::create_equipment),
        )
        .route(
            "/equipment/:id",
            get(api::equipment::get_equipment)
                .put(api::equipment::update_equipment)
                .delete(api::equipment::delete_equipment),
        )
        // Production
        .route(
            "/production",
            get(api::production::list_production).post(api::production::create_production),
        )
        .route(
            "/production/:id",
            get(api::production::get_production)
                .put(api::production::update_production)
                .delete(api::production::delete_production),
        )
        // Movements
        .route(
            "/movements",
            get(api::movements::list_movements).post(api::movements::create_movement),
        )
        .route(
            "/movements/:id",
            get(api::movements::get_movement)
                .put(api::movements::update_movement)
                .delete(api::movements::delete_movement),
        )
        // Employees
        .route(
            "/employees",
            get(api::employees::list_employees).post(api::employees::create_employee),
        )
        .route(
            "/employees/:id",
            get(api::employees::get_employee)
                .put(api::employees::update_employee)
                .delete(api::employees::delete_employee),
        )
        // MAC separations
        .route(
            "/separacao-macs",
            get(api::separations::list_separations_by_date).post(api::separations::create_separation),
        )
        .route("/separacao-macs/all", get(api::separations::list_recent_separations))
        .route(
            "/separacao-macs/:id",
            get(api::separations::get_separation)
                .patch(api::separations::update_separation_status)
                .delete(api::separations::delete_separation),
        )
        // Reconciliation
        .route(
            "/reconciliation",
            get(api::reconciliation::get_reconciliation_report),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api_routes)
        .merge(openapi)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// CORS for the dashboard origin; `*` allows any origin without credentials
fn cors_layer(origin: &str) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if origin == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers([AUTHORIZATION, CONTENT_TYPE]);
    }

    match origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .allow_credentials(true),
        Err(_) => {
            tracing::warn!(origin, "Invalid CORS origin, allowing any origin");
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(methods)
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        }
    }
}
