//! Injectable behaviour of the simulated backend
//!
//! The in-memory store models a remote service: every call may be delayed,
//! creates may fail at random, and transaction codes are generated randomly.
//! Each concern sits behind a trait so tests can swap in deterministic
//! implementations.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Operations a store performs, used to pick a delay or a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    List,
    Lookup,
    Search,
    Stats,
    Create,
}

/// Delay inserted before every store operation
#[async_trait]
pub trait LatencyStrategy: Send + Sync {
    async fn wait(&self, operation: StoreOperation);
}

/// Completes immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

#[async_trait]
impl LatencyStrategy for NoLatency {
    async fn wait(&self, _operation: StoreOperation) {}
}

/// Per-operation delays in milliseconds
///
/// Defaults keep reads cheap and writes expensive: stats 100, lookup and
/// search 200, listing 300, create 1000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyProfile {
    pub list_ms: u64,
    pub lookup_ms: u64,
    pub search_ms: u64,
    pub stats_ms: u64,
    pub create_ms: u64,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            list_ms: 300,
            lookup_ms: 200,
            search_ms: 200,
            stats_ms: 100,
            create_ms: 1000,
        }
    }
}

impl LatencyProfile {
    pub fn delay(&self, operation: StoreOperation) -> Duration {
        let ms = match operation {
            StoreOperation::List => self.list_ms,
            StoreOperation::Lookup => self.lookup_ms,
            StoreOperation::Search => self.search_ms,
            StoreOperation::Stats => self.stats_ms,
            StoreOperation::Create => self.create_ms,
        };
        Duration::from_millis(ms)
    }
}

/// Sleeps on the tokio timer according to a [`LatencyProfile`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedLatency {
    profile: LatencyProfile,
}

impl SimulatedLatency {
    pub fn new(profile: LatencyProfile) -> Self {
        Self { profile }
    }
}

#[async_trait]
impl LatencyStrategy for SimulatedLatency {
    async fn wait(&self, operation: StoreOperation) {
        let delay = self.profile.delay(operation);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Decides whether an operation fails with a simulated backend error
pub trait FailureInjector: Send + Sync {
    fn should_fail(&self, operation: StoreOperation) -> bool;
}

/// Never injects failures
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverFail;

impl FailureInjector for NeverFail {
    fn should_fail(&self, _operation: StoreOperation) -> bool {
        false
    }
}

/// Fails creates with a fixed probability; reads never fail
#[derive(Debug, Clone, Copy)]
pub struct RandomFailure {
    rate: f64,
}

impl RandomFailure {
    /// `rate` is clamped to `[0, 1]`
    pub fn new(rate: f64) -> Self {
        Self {
            rate: if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) },
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl FailureInjector for RandomFailure {
    fn should_fail(&self, operation: StoreOperation) -> bool {
        operation == StoreOperation::Create && rand::random::<f64>() < self.rate
    }
}

/// Produces candidate transaction codes
pub trait IdentificationGenerator: Send + Sync {
    fn generate(&self, now: DateTime<Utc>) -> String;
}

/// `TX-<year>-<last 3 digits of the epoch millis>-<4 random chars>`
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdentification;

impl IdentificationGenerator for RandomIdentification {
    fn generate(&self, now: DateTime<Utc>) -> String {
        const CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

        let mut rng = rand::thread_rng();
        let random: String = (0..4)
            .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
            .collect();

        format!(
            "TX-{}-{:03}-{}",
            now.year(),
            now.timestamp_millis().rem_euclid(1000),
            random
        )
    }
}
