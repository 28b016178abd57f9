//! Storage implementations for payment records

pub mod in_memory;
pub mod seed;
pub mod simulation;

pub use in_memory::{InMemoryPaymentStore, MAX_IDENTIFICATION_ATTEMPTS};
pub use seed::{seed_payments, seed_stats};
pub use simulation::{
    FailureInjector, IdentificationGenerator, LatencyProfile, LatencyStrategy, NeverFail,
    NoLatency, RandomFailure, RandomIdentification, SimulatedLatency, StoreOperation,
};
