//! Configuration System
//!
//! Run parameters loaded from a TOML file. Every section and field has a
//! documented default, so partial files are accepted.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "opinion.toml";

/// Complete run configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Population size, run length, seed and recording cadence
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Random network parameters
    #[serde(default)]
    pub network: NetworkConfig,
    /// Reputation and imitation tunables
    #[serde(default)]
    pub phases: PhaseParams,
}

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of agents (N)
    pub population: usize,
    /// Number of ticks to run
    pub steps: u64,
    /// Seed for the network and the shared random stream
    pub seed: u64,
    /// Record metrics when `step % record_every == 0`
    pub record_every: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population: 100,
            steps: 50,
            seed: 1,
            record_every: 5,
        }
    }
}

/// Network parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Target average degree (k)
    pub avg_degree: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { avg_degree: 6.0 }
    }
}

/// Phase tunables, shared read-only with every phase.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseParams {
    /// Reputation step on agreement/disagreement (δ)
    pub delta: f64,
    /// Per-tick reputation decay rate (λ)
    pub decay: f64,
    /// Lower reputation bound
    pub rep_min: f64,
    /// Upper reputation bound
    pub rep_max: f64,
    /// Fermi sensitivity (β)
    pub beta: f64,
}

impl Default for PhaseParams {
    fn default() -> Self {
        Self {
            delta: 0.02,
            decay: 0.01,
            rep_min: 0.0,
            rep_max: 5.0,
            beta: 1.0,
        }
    }
}

impl PhaseParams {
    /// Checks ranges of the tunables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.delta.is_finite() && self.delta >= 0.0) {
            return Err(invalid("delta", format!("must be a finite value >= 0, got {}", self.delta)));
        }
        if !(self.decay.is_finite() && (0.0..=1.0).contains(&self.decay)) {
            return Err(invalid("decay", format!("must be in [0, 1], got {}", self.decay)));
        }
        if !(self.rep_min.is_finite() && self.rep_max.is_finite()) {
            return Err(invalid("rep_min/rep_max", "reputation bounds must be finite".to_string()));
        }
        if self.rep_min > self.rep_max {
            return Err(invalid(
                "rep_min",
                format!("must not exceed rep_max ({} > {})", self.rep_min, self.rep_max),
            ));
        }
        if !self.beta.is_finite() {
            return Err(invalid("beta", format!("must be finite, got {}", self.beta)));
        }
        Ok(())
    }

    /// Clamps a reputation into `[rep_min, rep_max]`.
    pub fn clamp_reputation(&self, reputation: f64) -> f64 {
        reputation.clamp(self.rep_min, self.rep_max)
    }
}

fn invalid(name: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidParameter { name, reason }
}

impl SimConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Renders the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Edge probability of the random network, `k / (N - 1)`.
    pub fn edge_probability(&self) -> f64 {
        self.network.avg_degree / (self.simulation.population as f64 - 1.0)
    }

    /// Validates every parameter. Must pass before a run is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.simulation.population;
        if n < 2 {
            return Err(ConfigError::PopulationTooSmall(n));
        }

        let k = self.network.avg_degree;
        let max = n as f64 - 1.0;
        if !(k.is_finite() && k > 0.0 && k < max) {
            return Err(ConfigError::InvalidAverageDegree { value: k, max });
        }

        if self.simulation.record_every == 0 {
            return Err(invalid("record_every", "must be at least 1".to_string()));
        }

        self.phases.validate()
    }
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Opinion dynamics run configuration

[simulation]
population = 100
steps = 50
seed = 1
record_every = 5

[network]
avg_degree = 6.0

[phases]
delta = 0.02
decay = 0.01
rep_min = 0.0
rep_max = 5.0
beta = 1.0
"#
    .to_string()
}
