//! Core module containing the payment model and the traits around it

pub mod error;
pub mod format;
pub mod payment;
pub mod query;
pub mod service;
pub mod validation;

pub use error::{
    ConfigError, DashboardError, ErrorResponse, FieldErrors, PaymentError, RequestError,
    StoreError, ValidationError,
};
pub use payment::{
    NewPayment, Payment, PaymentScheme, PaymentStats, PaymentStatus, SelectOption, WALLET_OPTIONS,
};
pub use query::{ListQuery, PAGE_SIZE, PaginationMeta};
pub use service::PaymentRepository;
