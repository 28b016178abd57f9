//! Service trait for payment persistence

use crate::core::error::StoreError;
use crate::core::payment::{NewPayment, Payment, PaymentStats};
use async_trait::async_trait;

/// Repository of payment records and their aggregate stats
///
/// Every operation may suspend: implementations are free to model network or
/// database latency. Reads always return defensive copies, so callers never
/// observe a half-applied write.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// All payments, newest first
    async fn list_payments(&self) -> Vec<Payment>;

    /// Look up a payment by its internal `id`
    async fn get_payment(&self, id: &str) -> Option<Payment>;

    /// Current aggregate stats
    async fn get_stats(&self) -> PaymentStats;

    /// Case-insensitive substring search over identification, recipient,
    /// status and scheme. A blank query returns every payment.
    async fn search_payments(&self, query: &str) -> Vec<Payment>;

    /// Admit a new payment
    ///
    /// Input is assumed to be validated already. On error nothing is stored.
    async fn create_payment(&self, input: NewPayment) -> Result<Payment, StoreError>;

    /// Restore the initial collection and stats
    async fn reset(&self);
}

/// Whether `payment` matches a store-level search query
///
/// `needle` must already be lowercase.
pub fn matches_store_query(payment: &Payment, needle: &str) -> bool {
    payment.identification.to_lowercase().contains(needle)
        || payment.recipient.to_lowercase().contains(needle)
        || payment.status.as_str().contains(needle)
        || payment.scheme.as_str().contains(needle)
}
