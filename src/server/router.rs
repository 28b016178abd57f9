//! Router builder for payment routes

use super::handlers::{
    AppState, create_payment, form_options, get_invoice, get_payment, get_stats, health_check,
    list_payments, search_payments,
};
use axum::{Router, routing::get};

/// Build payment routes
///
/// - GET /payments - One page of the view-state pipeline
/// - POST /payments - Create a payment
/// - GET /payments/search?q= - Store-level search
/// - GET /payments/stats - Aggregate stats
/// - GET /payments/{id} - A single payment
/// - GET /payments/{id}/invoice - Invoice download
/// - GET /payment-options - Schemes and wallets for the creation form
pub fn build_payment_routes(state: AppState) -> Router {
    Router::new()
        .route("/payments", get(list_payments).post(create_payment))
        .route("/payments/search", get(search_payments))
        .route("/payments/stats", get(get_stats))
        .route("/payments/{id}", get(get_payment))
        .route("/payments/{id}/invoice", get(get_invoice))
        .route("/payment-options", get(form_options))
        .with_state(state)
}

/// Build health check routes
pub fn build_health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}
