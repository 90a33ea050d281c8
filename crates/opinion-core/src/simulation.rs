//! Tick Driver
//!
//! Owns the ECS world holding all run state and the phase schedule. One tick
//! advances the step counter and then runs vote, reputation, Fermi and record
//! in that order. There is no convergence check; a run always goes the full
//! configured length.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use opinion_events::{MetricsHistory, NetworkSummary, PopulationSnapshot};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::components::agent::Population;
use crate::components::network::Network;
use crate::components::run::RunState;
use crate::config::{PhaseParams, SimConfig};
use crate::error::ConfigError;
use crate::output::RunReport;
use crate::setup::{spawn_population, ErdosRenyi, NetworkProvider};
use crate::systems::{fermi_phase, record_metrics, reputation_phase, vote_phase, MetricsRecorder};
use crate::SimRng;

/// A configured, runnable simulation.
pub struct Simulation {
    config: SimConfig,
    world: World,
    schedule: Schedule,
}

impl Simulation {
    /// Builds a run on a G(n, p) network generated from the config.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        Self::with_provider(config, &ErdosRenyi)
    }

    /// Builds a run on a network produced by `provider`.
    pub fn with_provider(
        config: SimConfig,
        provider: &dyn NetworkProvider,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let network = provider.generate(
            config.simulation.population,
            config.network.avg_degree,
            config.simulation.seed,
        )?;
        Self::with_network(config, network)
    }

    /// Builds a run on an explicitly supplied network.
    pub fn with_network(config: SimConfig, network: Network) -> Result<Self, ConfigError> {
        config.validate()?;
        let n = config.simulation.population;
        if network.node_count() != n {
            return Err(ConfigError::NetworkSizeMismatch {
                expected: n,
                actual: network.node_count(),
            });
        }

        let summary = network.summary();
        info!(
            nodes = summary.nodes,
            edges = summary.edges,
            mean_degree = summary.mean_degree,
            "network ready"
        );
        if summary.isolated > 0 {
            warn!(
                isolated = summary.isolated,
                "network has isolated agents; their neighbor updates will be skipped"
            );
        }

        let mut rng = SmallRng::seed_from_u64(config.simulation.seed);
        let population = spawn_population(n, &mut rng);

        let mut world = World::new();
        world.insert_resource(config.phases.clone());
        world.insert_resource(network);
        world.insert_resource(population);
        world.insert_resource(SimRng(rng));
        world.insert_resource(RunState::new(config.simulation.steps));
        world.insert_resource(MetricsRecorder::new(config.simulation.record_every));

        Ok(Self {
            config,
            world,
            schedule: build_schedule(),
        })
    }

    /// Runs one tick. Returns `false` without doing anything once the
    /// configured number of ticks has been reached.
    pub fn step(&mut self) -> bool {
        {
            let mut run_state = self.world.resource_mut::<RunState>();
            if run_state.is_finished() {
                return false;
            }
            run_state.advance_tick();
        }
        self.schedule.run(&mut self.world);
        true
    }

    /// Runs up to `ticks` more ticks, stopping at the configured total.
    /// Returns the number of ticks run.
    pub fn run_for(&mut self, ticks: u64) -> u64 {
        let mut ran = 0;
        while ran < ticks && self.step() {
            ran += 1;
        }
        ran
    }

    /// Runs every remaining tick.
    pub fn run(&mut self) -> &MetricsHistory {
        let remaining = self.world.resource::<RunState>().remaining();
        info!(
            agents = self.config.simulation.population,
            ticks = remaining,
            seed = self.config.simulation.seed,
            "starting run"
        );
        self.run_for(remaining);

        let population = self.population();
        info!(
            steps = self.step_count(),
            samples = self.history().len(),
            opinion_fraction = population.opinion_fraction(),
            mean_reputation = population.mean_reputation(),
            "run complete"
        );
        self.history()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn step_count(&self) -> u64 {
        self.world.resource::<RunState>().step_count
    }

    pub fn is_finished(&self) -> bool {
        self.world.resource::<RunState>().is_finished()
    }

    pub fn population(&self) -> &Population {
        self.world.resource::<Population>()
    }

    pub fn network(&self) -> &Network {
        self.world.resource::<Network>()
    }

    pub fn params(&self) -> &PhaseParams {
        self.world.resource::<PhaseParams>()
    }

    pub fn history(&self) -> &MetricsHistory {
        self.world.resource::<MetricsRecorder>().history()
    }

    pub fn network_summary(&self) -> NetworkSummary {
        self.network().summary()
    }

    /// Current population state with per-agent degrees.
    pub fn snapshot(&self) -> PopulationSnapshot {
        self.population().snapshot(self.step_count(), self.network())
    }

    /// Consumes the run into a serializable report.
    pub fn into_report(mut self) -> RunReport {
        let final_population = self.snapshot();
        let network = self.network_summary();
        let metrics = self
            .world
            .remove_resource::<MetricsRecorder>()
            .map(MetricsRecorder::into_history)
            .unwrap_or_default();
        RunReport::new(self.config, network, metrics, final_population)
    }
}

/// Phase schedule for one tick.
///
/// Single-threaded so the shared random stream is consumed in a fixed order.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems((vote_phase, reputation_phase, fermi_phase, record_metrics).chain());
    schedule
}
