//! Form-facing actions over a payment repository
//!
//! Every action returns an [`ActionState`]: a success flag, a user-facing
//! message and either the data or the reason it failed. Validation runs before
//! the repository is touched, so a rejected form never mutates the store.

pub use crate::core::error::CREATE_FAILED_MESSAGE;
use crate::core::error::{FieldErrors, StoreError};
use crate::core::payment::{Payment, PaymentStats};
use crate::core::service::PaymentRepository;
use crate::core::validation::validate_create_payment;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub const CREATED_MESSAGE: &str = "Transacción creada con éxito";
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

/// Why an action failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// The form was rejected; see [`ActionState::errors`]
    Validation,
    /// The form was valid but the backend could not complete it
    Backend,
}

/// Outcome of an action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionState<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl<T> ActionState<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
            failure: None,
        }
    }

    pub fn invalid(errors: FieldErrors) -> Self {
        Self {
            success: false,
            message: VALIDATION_FAILED_MESSAGE.to_string(),
            data: None,
            errors: Some(errors),
            failure: Some(FailureKind::Validation),
        }
    }

    pub fn backend_failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: None,
            failure: Some(FailureKind::Backend),
        }
    }

    pub fn is_validation_failure(&self) -> bool {
        self.failure == Some(FailureKind::Validation)
    }

    pub fn is_backend_failure(&self) -> bool {
        self.failure == Some(FailureKind::Backend)
    }
}

/// User-facing message for a failed create
pub fn store_failure_message(error: &StoreError) -> String {
    error.user_message()
}

/// Actions bound to one repository
#[derive(Clone)]
pub struct PaymentActions {
    repository: Arc<dyn PaymentRepository>,
}

impl PaymentActions {
    pub fn new(repository: Arc<dyn PaymentRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<dyn PaymentRepository> {
        &self.repository
    }

    /// Validate `form` and create the payment it describes
    pub async fn create_payment(&self, form: &Value) -> ActionState<Payment> {
        let input = match validate_create_payment(form) {
            Ok(input) => input,
            Err(errors) => {
                tracing::debug!(fields = %errors, "payment form rejected");
                return ActionState::invalid(errors);
            }
        };

        match self.repository.create_payment(input).await {
            Ok(payment) => {
                tracing::info!(
                    payment_id = %payment.id,
                    identification = %payment.identification,
                    "payment created"
                );
                ActionState::ok(CREATED_MESSAGE, payment)
            }
            Err(e) => {
                tracing::warn!(error = %e, "error creating payment");
                ActionState::backend_failure(store_failure_message(&e))
            }
        }
    }

    pub async fn list_payments(&self) -> ActionState<Vec<Payment>> {
        let payments = self.repository.list_payments().await;
        ActionState::ok("Payments fetched successfully", payments)
    }

    pub async fn payment_stats(&self) -> ActionState<PaymentStats> {
        let stats = self.repository.get_stats().await;
        ActionState::ok("Stats fetched successfully", stats)
    }

    pub async fn search_payments(&self, query: &str) -> ActionState<Vec<Payment>> {
        let payments = self.repository.search_payments(query).await;
        ActionState::ok("Search completed successfully", payments)
    }
}
