//! HTTP exposure of the payment dashboard
//!
//! This module provides a `ServerBuilder` that registers:
//! - Payment list, search, stats, lookup and creation routes
//! - Invoice download
//! - Health check routes

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::{AppState, PaymentListResponse};
