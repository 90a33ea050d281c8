//! Simulation state
//!
//! Agent population, interaction network and the tick counter.

pub mod agent;
pub mod network;
pub mod run;

pub use agent::*;
pub use network::*;
pub use run::*;
