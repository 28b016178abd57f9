//! In-memory payment repository simulating a remote backend

use crate::config::SimulationConfig;
use crate::core::error::StoreError;
use crate::core::payment::{
    DEFAULT_CURRENCY, NewPayment, Payment, PaymentStats, PaymentStatus,
};
use crate::core::service::{PaymentRepository, matches_store_query};
use crate::storage::seed::{seed_payments, seed_stats};
use crate::storage::simulation::{
    FailureInjector, IdentificationGenerator, LatencyStrategy, NeverFail, NoLatency,
    RandomFailure, RandomIdentification, SimulatedLatency, StoreOperation,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// How many candidate identifications are tried before giving up
pub const MAX_IDENTIFICATION_ATTEMPTS: usize = 100;

#[derive(Debug, Clone)]
struct Ledger {
    payments: Vec<Payment>,
    stats: PaymentStats,
}

/// In-memory payment store
///
/// Holds the payments newest first together with their aggregate stats.
/// Payments and stats live under one lock so a create is observed either
/// completely or not at all. Clones share the same data.
///
/// `new()` is deterministic: seeded, no latency, no injected failures. Use
/// [`from_config`](Self::from_config) or the `with_*` methods to simulate a
/// slow, flaky backend.
#[derive(Clone)]
pub struct InMemoryPaymentStore {
    ledger: Arc<RwLock<Ledger>>,
    seed: Arc<Ledger>,
    latency: Arc<dyn LatencyStrategy>,
    failures: Arc<dyn FailureInjector>,
    identifications: Arc<dyn IdentificationGenerator>,
}

impl InMemoryPaymentStore {
    /// Create a store holding the seed payments
    pub fn new() -> Self {
        Self::with_seed(seed_payments(), seed_stats())
    }

    /// Create a store holding `payments` (newest first) and `stats`
    ///
    /// [`reset`](PaymentRepository::reset) restores exactly this state.
    pub fn with_seed(payments: Vec<Payment>, stats: PaymentStats) -> Self {
        let seed = Ledger { payments, stats };
        Self {
            ledger: Arc::new(RwLock::new(seed.clone())),
            seed: Arc::new(seed),
            latency: Arc::new(NoLatency),
            failures: Arc::new(NeverFail),
            identifications: Arc::new(RandomIdentification),
        }
    }

    /// Create a store with no payments and zeroed stats
    pub fn empty() -> Self {
        Self::with_seed(
            Vec::new(),
            PaymentStats {
                balance: 0.0,
                payment_count: 0,
                total_paid: 0.0,
            },
        )
    }

    /// Create a seeded store simulating the configured backend
    pub fn from_config(config: &SimulationConfig) -> Self {
        let store = Self::new().with_failures(RandomFailure::new(config.failure_rate));
        if config.enabled {
            store.with_latency(SimulatedLatency::new(config.latency))
        } else {
            store
        }
    }

    pub fn with_latency(mut self, latency: impl LatencyStrategy + 'static) -> Self {
        self.latency = Arc::new(latency);
        self
    }

    pub fn with_failures(mut self, failures: impl FailureInjector + 'static) -> Self {
        self.failures = Arc::new(failures);
        self
    }

    pub fn with_identifications(
        mut self,
        generator: impl IdentificationGenerator + 'static,
    ) -> Self {
        self.identifications = Arc::new(generator);
        self
    }

    fn unique_identification(
        &self,
        existing: &[Payment],
        now: DateTime<Utc>,
    ) -> Result<String, StoreError> {
        for attempt in 1..=MAX_IDENTIFICATION_ATTEMPTS {
            let candidate = self.identifications.generate(now);
            if !existing.iter().any(|p| p.identification == candidate) {
                return Ok(candidate);
            }
            tracing::debug!(attempt, identification = %candidate, "identification collision");
        }

        tracing::warn!(
            attempts = MAX_IDENTIFICATION_ATTEMPTS,
            "could not generate a unique identification"
        );
        Err(StoreError::IdentifierExhausted {
            attempts: MAX_IDENTIFICATION_ATTEMPTS,
        })
    }
}

impl Default for InMemoryPaymentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentStore {
    async fn list_payments(&self) -> Vec<Payment> {
        self.latency.wait(StoreOperation::List).await;
        self.ledger.read().await.payments.clone()
    }

    async fn get_payment(&self, id: &str) -> Option<Payment> {
        self.latency.wait(StoreOperation::Lookup).await;
        self.ledger
            .read()
            .await
            .payments
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    async fn get_stats(&self) -> PaymentStats {
        self.latency.wait(StoreOperation::Stats).await;
        self.ledger.read().await.stats
    }

    async fn search_payments(&self, query: &str) -> Vec<Payment> {
        self.latency.wait(StoreOperation::Search).await;
        let ledger = self.ledger.read().await;

        if query.trim().is_empty() {
            return ledger.payments.clone();
        }

        let needle = query.to_lowercase();
        ledger
            .payments
            .iter()
            .filter(|p| matches_store_query(p, &needle))
            .cloned()
            .collect()
    }

    async fn create_payment(&self, input: NewPayment) -> Result<Payment, StoreError> {
        self.latency.wait(StoreOperation::Create).await;

        if self.failures.should_fail(StoreOperation::Create) {
            tracing::warn!(handle = %input.handle, "simulated backend failure on create");
            return Err(StoreError::TransientCreate);
        }

        let now = Utc::now();
        let mut ledger = self.ledger.write().await;
        let identification = self.unique_identification(&ledger.payments, now)?;

        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            identification,
            recipient: input.recipient(),
            order_amount: input.amount,
            currency: DEFAULT_CURRENCY.to_string(),
            created_at: now,
            completed_at: now,
            status: PaymentStatus::Pending,
            scheme: input.scheme,
        };

        ledger.payments.insert(0, payment.clone());
        ledger.stats = ledger.stats.record_payment(input.amount);

        tracing::debug!(
            payment_id = %payment.id,
            identification = %payment.identification,
            amount = input.amount,
            wallet = %input.wallet,
            "payment created"
        );

        Ok(payment)
    }

    async fn reset(&self) {
        let mut ledger = self.ledger.write().await;
        *ledger = (*self.seed).clone();
        tracing::info!(payments = ledger.payments.len(), "payment store reset");
    }
}
