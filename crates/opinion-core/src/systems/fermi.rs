//! Fermi Imitation Phase
//!
//! N pairwise comparisons per tick. A focal agent B picks a random neighbor A
//! and, if they disagree, adopts A's opinion with probability
//! `1 / (1 + exp(-β (rep_A - rep_B)))`.
//!
//! Draws per event: focal id, then neighbor (unless B is isolated), then the
//! accept/reject value (only when the opinions differ).

use bevy_ecs::prelude::*;
use rand::Rng;
use tracing::trace;

use crate::components::agent::Population;
use crate::components::network::Network;
use crate::config::PhaseParams;
use crate::SimRng;

/// Result of a single comparison event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FermiOutcome {
    /// Focal agent has no neighbors
    Isolated,
    /// Neighbor already shares the focal opinion
    SameOpinion,
    /// Focal agent copied the neighbor's opinion
    Adopted,
    /// Focal agent kept its opinion
    Rejected,
}

/// Counts from one Fermi pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FermiStats {
    pub events: usize,
    pub isolated: usize,
    pub same_opinion: usize,
    pub adopted: usize,
    pub rejected: usize,
}

impl FermiStats {
    fn tally(&mut self, outcome: FermiOutcome) {
        self.events += 1;
        match outcome {
            FermiOutcome::Isolated => self.isolated += 1,
            FermiOutcome::SameOpinion => self.same_opinion += 1,
            FermiOutcome::Adopted => self.adopted += 1,
            FermiOutcome::Rejected => self.rejected += 1,
        }
    }
}

/// Probability that the focal agent copies the neighbor.
///
/// Logistic in `beta * (neighbor_reputation - focal_reputation)`, evaluated so
/// that `exp` only ever sees a non-positive argument and cannot overflow.
pub fn fermi_probability(beta: f64, neighbor_reputation: f64, focal_reputation: f64) -> f64 {
    let x = beta * (neighbor_reputation - focal_reputation);
    if x.is_nan() {
        return 0.5;
    }
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// One comparison event for a given focal agent.
pub fn fermi_event<R: Rng + ?Sized>(
    population: &mut Population,
    network: &Network,
    beta: f64,
    focal: usize,
    rng: &mut R,
) -> FermiOutcome {
    let Some(neighbor) = network.sample_neighbor(focal, rng) else {
        return FermiOutcome::Isolated;
    };

    let neighbor_opinion = population.opinion(neighbor);
    if neighbor_opinion == population.opinion(focal) {
        return FermiOutcome::SameOpinion;
    }

    let p = fermi_probability(
        beta,
        population.reputation(neighbor),
        population.reputation(focal),
    );
    if rng.gen::<f64>() < p {
        population.set_opinion(focal, neighbor_opinion);
        FermiOutcome::Adopted
    } else {
        FermiOutcome::Rejected
    }
}

/// Runs `population.len()` events with focal agents drawn with replacement.
pub fn run_fermi_events<R: Rng + ?Sized>(
    population: &mut Population,
    network: &Network,
    params: &PhaseParams,
    rng: &mut R,
) -> FermiStats {
    let n = population.len();
    let mut stats = FermiStats::default();
    for _ in 0..n {
        let focal = rng.gen_range(0..n);
        stats.tally(fermi_event(population, network, params.beta, focal, rng));
    }
    stats
}

/// System: run this tick's imitation events
pub fn fermi_phase(
    params: Res<PhaseParams>,
    network: Res<Network>,
    mut population: ResMut<Population>,
    mut rng: ResMut<SimRng>,
) {
    let stats = run_fermi_events(&mut population, &network, &params, &mut rng.0);
    trace!(?stats, "fermi phase");
}
