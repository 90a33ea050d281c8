//! Shared metric and snapshot types for the opinion dynamics simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! Downstream consumers (plotting, reporting) depend only on these types.

pub mod metrics;
pub mod snapshot;

// Re-export metric types
pub use metrics::{HistoryLengthMismatch, MetricsHistory, MetricsSample};

// Re-export snapshot types
pub use snapshot::{generate_run_id, AgentSnapshot, NetworkSummary, PopulationSnapshot};

/// Fraction of agents holding opinion 1 mapped to the share held by the majority side.
pub fn consensus_share(opinion_fraction: f64) -> f64 {
    opinion_fraction.max(1.0 - opinion_fraction)
}
