//! Error types for the opinion dynamics engine.

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Invalid run configuration. Raised before any tick runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Fewer than two agents
    #[error("population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    /// Average degree outside (0, N - 1)
    #[error("average degree must be in (0, {max}), got {value}")]
    InvalidAverageDegree { value: f64, max: f64 },
    /// Phase parameter out of range
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    /// Externally supplied network does not match the population
    #[error("network has {actual} nodes but population size is {expected}")]
    NetworkSizeMismatch { expected: usize, actual: usize },
    /// Edge endpoint outside the node range
    #[error("edge ({0}, {1}) references a node outside the network")]
    EdgeOutOfRange(usize, usize),
    /// IO error reading a config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Error rendering config as TOML
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Top-level error for running and reporting a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
