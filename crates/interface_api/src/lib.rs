//! HTTP API Layer
//!
//! This crate provides the REST API for the trade ledger using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for customers, orders, suppliers,
//!   transactions, and integrity administration
//! - **Middleware**: Tracing and audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(service, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_ledger::PaymentService;

use crate::config::ApiConfig;
use crate::handlers::{admin, customer, health, order, supplier, transaction};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PaymentService>,
    pub config: ApiConfig,
}

/// Creates the main API router
pub fn create_router(service: Arc<PaymentService>, config: ApiConfig) -> Router {
    let state = AppState { service, config };

    // Liveness/readiness outside the audited API surface
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let customer_routes = Router::new()
        .route("/", post(customer::create_customer))
        .route("/", get(customer::list_customers))
        .route("/:id", get(customer::get_customer))
        .route("/:id/payment", post(customer::record_payment))
        .route("/:id/orders", get(customer::list_orders))
        .route("/:id/ledger", get(customer::get_ledger))
        .route("/:id/transactions", get(customer::list_transactions))
        .route("/:id/adjustments", post(customer::create_adjustment));

    let order_routes = Router::new()
        .route("/", post(order::create_order))
        .route("/:id", get(order::get_order));

    let supplier_routes = Router::new()
        .route("/", post(supplier::create_supplier))
        .route("/", get(supplier::list_suppliers))
        .route("/:id", get(supplier::get_supplier))
        .route("/:id/payment", post(supplier::record_payment))
        .route("/:id/purchases", post(supplier::record_purchase))
        .route("/:id/expenses", post(supplier::record_expense));

    let transaction_routes = Router::new().route("/", get(transaction::list_transactions));

    let admin_routes =
        Router::new().route("/customers/:id/repair", post(admin::repair_customer));

    let api_routes = Router::new()
        .nest("/customers", customer_routes)
        .nest("/orders", order_routes)
        .nest("/suppliers", supplier_routes)
        .nest("/transactions", transaction_routes)
        .nest("/admin", admin_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ));

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
