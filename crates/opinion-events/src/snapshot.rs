//! Snapshot Types
//!
//! Serialization structs for the population and network at a point in time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a unique identifier for a simulation run.
pub fn generate_run_id() -> String {
    format!("run_{}", Uuid::new_v4().simple())
}

/// Single agent state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: usize,
    pub opinion: u8,
    pub reputation: f64,
    pub degree: usize,
}

/// Full population state with aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    /// Step count at which the snapshot was taken
    pub step: u64,
    pub opinion_fraction: f64,
    pub consensus: f64,
    pub mean_reputation: f64,
    pub agents: Vec<AgentSnapshot>,
}

/// Degree statistics of the interaction network
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub nodes: usize,
    pub edges: usize,
    pub mean_degree: f64,
    pub min_degree: usize,
    pub max_degree: usize,
    /// Nodes with no neighbors
    pub isolated: usize,
}
