//! Typed error handling for the payment dashboard
//!
//! Errors are grouped by category so callers can match on what went wrong
//! instead of inspecting strings.
//!
//! # Error Categories
//!
//! - [`PaymentError`]: lookups of payments that do not exist
//! - [`ValidationError`]: rejected form input, reported per field
//! - [`StoreError`]: simulated backend failures while creating a payment
//! - [`ConfigError`]: configuration parsing and validation
//! - [`RequestError`]: malformed HTTP requests
//!
//! # Example
//!
//! ```rust,ignore
//! match store.create_payment(new_payment).await {
//!     Ok(payment) => println!("created {}", payment.identification),
//!     Err(StoreError::TransientCreate) => retry(),
//!     Err(e) => eprintln!("giving up: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// User-facing message for a create that failed without a retryable cause
pub const CREATE_FAILED_MESSAGE: &str = "Error al crear la transacción";

/// The main error type of the dashboard
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DashboardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Payment(e) => e.status_code(),
            DashboardError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DashboardError::Store(e) => e.status_code(),
            DashboardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Request(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::Payment(e) => e.error_code(),
            DashboardError::Validation(_) => "VALIDATION_ERROR",
            DashboardError::Store(e) => e.error_code(),
            DashboardError::Config(_) => "CONFIG_ERROR",
            DashboardError::Request(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: match self {
                DashboardError::Store(e) => e.user_message(),
                _ => self.to_string(),
            },
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DashboardError::Payment(PaymentError::NotFound { id }) => {
                Some(serde_json::json!({ "id": id }))
            }
            DashboardError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Payment Errors
// =============================================================================

/// Errors related to individual payments
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment '{id}' not found")]
    NotFound { id: String },
}

impl PaymentError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PaymentError::NotFound { .. } => "PAYMENT_NOT_FOUND",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Field name to error messages, in field-name order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages recorded for `field`, empty when the field passed
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msgs: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join("; ")))
            .collect();
        write!(f, "{}", msgs.join(", "))
    }
}

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more fields failed their rules
    #[error("Validation errors: {0}")]
    FieldErrors(FieldErrors),

    /// The payload was not a JSON object
    #[error("Invalid payload: {message}")]
    InvalidPayload { message: String },
}

// =============================================================================
// Store Errors
// =============================================================================

/// Failures raised by a payment repository while creating a payment
///
/// Both variants are transient: the store is left untouched and the request
/// can be retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Simulated backend flakiness
    #[error("Network error: Could not create payment")]
    TransientCreate,

    /// Every generated identification collided with an existing one
    #[error("Could not generate unique identification after {attempts} attempts")]
    IdentifierExhausted { attempts: usize },
}

impl StoreError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::TransientCreate => StatusCode::SERVICE_UNAVAILABLE,
            StoreError::IdentifierExhausted { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::TransientCreate => "STORE_UNAVAILABLE",
            StoreError::IdentifierExhausted { .. } => "IDENTIFIER_EXHAUSTED",
        }
    }

    /// Message shown to users
    ///
    /// Transient failures are worth retrying, so their message says so;
    /// anything else collapses into a generic creation failure.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::TransientCreate => self.to_string(),
            StoreError::IdentifierExhausted { .. } => CREATE_FAILED_MESSAGE.to_string(),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid query parameter '{param}': {message}")]
    InvalidQuery { param: String, message: String },

    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },
}

impl RequestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidQuery { .. } => "INVALID_QUERY",
            RequestError::InvalidBody { .. } => "INVALID_BODY",
        }
    }
}

// =============================================================================
// Conversions from standard errors
// =============================================================================

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Request(RequestError::InvalidBody {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            message: err.to_string(),
        }
    }
}
