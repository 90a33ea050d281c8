//! Reputation Phase
//!
//! Every agent, in id order: decay, compare with one sampled neighbor, nudge
//! by ±δ, clamp. Opinions are read-only here.

use bevy_ecs::prelude::*;
use rand::Rng;
use tracing::trace;

use crate::components::agent::Population;
use crate::components::network::Network;
use crate::config::PhaseParams;
use crate::SimRng;

/// Counts from one reputation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReputationStats {
    pub agreements: usize,
    pub disagreements: usize,
    /// Agents with no neighbor to compare against
    pub isolated: usize,
}

/// Runs the reputation update for every agent.
///
/// Consumes one draw per non-isolated agent. Isolated agents still decay and
/// are clamped into bounds, but get no agreement adjustment.
pub fn update_reputations<R: Rng + ?Sized>(
    population: &mut Population,
    network: &Network,
    params: &PhaseParams,
    rng: &mut R,
) -> ReputationStats {
    let mut stats = ReputationStats::default();
    let retain = 1.0 - params.decay;

    for id in 0..population.len() {
        let mut reputation = population.reputation(id) * retain;

        match network.sample_neighbor(id, rng) {
            Some(neighbor) => {
                if population.opinion(neighbor) == population.opinion(id) {
                    reputation += params.delta;
                    stats.agreements += 1;
                } else {
                    reputation -= params.delta;
                    stats.disagreements += 1;
                }
            }
            None => stats.isolated += 1,
        }

        population.set_reputation(id, params.clamp_reputation(reputation));
    }

    stats
}

/// System: update reputations for this tick
pub fn reputation_phase(
    params: Res<PhaseParams>,
    network: Res<Network>,
    mut population: ResMut<Population>,
    mut rng: ResMut<SimRng>,
) {
    let stats = update_reputations(&mut population, &network, &params, &mut rng.0);
    trace!(?stats, "reputation phase");
}
