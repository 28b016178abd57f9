//! # Paydesk
//!
//! Backend of a payments dashboard: an in-memory payment store that behaves
//! like a slow, occasionally failing remote service, a pure view-state engine
//! for the payment table, and a validated creation workflow.
//!
//! ## Features
//!
//! - **Simulated backend**: injectable latency, failure and identification strategies
//! - **View-state engine**: sort, search, date range and pagination as pure functions
//! - **Tri-state sorting**: neutral, ascending, descending per column
//! - **Form validation**: every field error reported at once
//! - **Invoices**: per-payment text invoices
//! - **HTTP API**: axum routes with typed error responses
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paydesk::prelude::*;
//!
//! let store = InMemoryPaymentStore::new();
//! let payments = store.list_payments().await;
//!
//! let mut state = ViewState::new();
//! state.set_query("maria");
//! state.toggle_sort(SortField::OrderAmount);
//!
//! let view = state.derive(&payments);
//! println!("{} of {} pages", view.pagination.page, view.pagination.total_pages);
//! ```

pub mod actions;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod invoice;
pub mod server;
pub mod storage;
pub mod view;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{
            ConfigError, DashboardError, ErrorResponse, FieldErrors, PaymentError, RequestError,
            StoreError, ValidationError,
        },
        format::{
            format_compact_currency, format_currency, format_date, format_date_time,
            format_relative_date, format_short_date, parse_amount,
        },
        payment::{
            NewPayment, Payment, PaymentScheme, PaymentStats, PaymentStatus,
            SelectOption, WALLET_OPTIONS,
        },
        query::{ListQuery, PAGE_SIZE, PaginationMeta},
        service::PaymentRepository,
        validation::validate_create_payment,
    };

    // === Storage ===
    pub use crate::storage::{
        InMemoryPaymentStore, LatencyProfile, LatencyStrategy, NoLatency, RandomFailure,
        SimulatedLatency,
    };

    // === View ===
    pub use crate::view::{
        DateRange, PaymentView, SortDirection, SortField, SortState, ViewState, date_range_label,
    };

    // === Workflow ===
    pub use crate::actions::{ActionState, FailureKind, PaymentActions};
    pub use crate::dashboard::PaymentsDashboard;
    pub use crate::invoice::Invoice;

    // === Config & Server ===
    pub use crate::config::DashboardConfig;
    pub use crate::server::ServerBuilder;

    // === External re-exports ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
    pub use std::sync::Arc;
}
