//! Reputation-weighted opinion dynamics on a fixed random network.
//!
//! Each tick runs four phases in a fixed order over a shared seeded random
//! stream: a majority vote tally, a local reputation update, Fermi imitation,
//! and periodic metric recording. Given the same configuration and seed, a run
//! reproduces its metrics history bit for bit.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod error;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::{Agent, Network, Opinion, Population, RunState, INITIAL_REPUTATION};
pub use config::{default_config_toml, NetworkConfig, PhaseParams, SimConfig, SimulationConfig};
pub use error::{ConfigError, Result, SimError};
pub use output::{read_report, write_report, RunReport};
pub use setup::{spawn_population, ErdosRenyi, NetworkProvider};
pub use simulation::Simulation;

pub use opinion_events::{MetricsHistory, MetricsSample, NetworkSummary, PopulationSnapshot};

/// Seeded random number generator resource, shared by every phase
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
