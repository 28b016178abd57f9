//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::storage::simulation::LatencyProfile;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the server binds to
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Behaviour of the simulated payment backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// When false every operation completes immediately
    pub enabled: bool,

    /// Probability in `[0, 1]` that a create fails with a transient error
    pub failure_rate: f64,

    /// Per-operation delays
    pub latency: LatencyProfile,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            failure_rate: 0.1,
            latency: LatencyProfile::default(),
        }
    }
}

/// Complete configuration of the dashboard service
///
/// Every section is optional in YAML:
///
/// ```yaml
/// server:
///   bind: "0.0.0.0:8080"
/// simulation:
///   failure_rate: 0.0
///   latency:
///     create_ms: 250
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerConfig,
    pub simulation: SimulationConfig,
}

impl DashboardConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.simulation.failure_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::InvalidValue {
                field: "simulation.failure_rate".to_string(),
                value: rate.to_string(),
                message: "must be between 0 and 1".to_string(),
            });
        }
        Ok(())
    }

    /// Configuration for automated tests: no latency, no injected failures
    pub fn for_tests() -> Self {
        Self {
            server: ServerConfig::default(),
            simulation: SimulationConfig {
                enabled: false,
                failure_rate: 0.0,
                latency: LatencyProfile::default(),
            },
        }
    }
}
