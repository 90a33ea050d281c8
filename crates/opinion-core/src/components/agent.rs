//! Agent Population
//!
//! Per-agent opinion and reputation, stored as a plain vector indexed by id.
//! Agent `i` always sits on network node `i`.

use bevy_ecs::prelude::*;
use opinion_events::{consensus_share, AgentSnapshot, PopulationSnapshot};
use serde::{Deserialize, Serialize};

use super::network::Network;

/// Reputation every agent starts with
pub const INITIAL_REPUTATION: f64 = 1.0;

/// Binary opinion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opinion {
    Zero,
    One,
}

impl Opinion {
    pub fn as_u8(self) -> u8 {
        match self {
            Opinion::Zero => 0,
            Opinion::One => 1,
        }
    }

    pub fn from_bool(one: bool) -> Self {
        if one {
            Opinion::One
        } else {
            Opinion::Zero
        }
    }
}

impl From<Opinion> for u8 {
    fn from(opinion: Opinion) -> Self {
        opinion.as_u8()
    }
}

/// A single agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: usize,
    pub opinion: Opinion,
    pub reputation: f64,
}

/// Resource: all agents of the run, indexed by id
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Population {
    agents: Vec<Agent>,
}

impl Population {
    /// Builds a population from opinions in id order, all with the same reputation.
    pub fn from_opinions(opinions: impl IntoIterator<Item = Opinion>, reputation: f64) -> Self {
        let agents = opinions
            .into_iter()
            .enumerate()
            .map(|(id, opinion)| Agent {
                id,
                opinion,
                reputation,
            })
            .collect();
        Self { agents }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Agent> {
        self.agents.get(id)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut Agent> {
        self.agents.get_mut(id)
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Opinion of agent `id`. Panics if `id` is out of range.
    pub fn opinion(&self, id: usize) -> Opinion {
        self.agents[id].opinion
    }

    /// Reputation of agent `id`. Panics if `id` is out of range.
    pub fn reputation(&self, id: usize) -> f64 {
        self.agents[id].reputation
    }

    pub fn set_opinion(&mut self, id: usize, opinion: Opinion) {
        self.agents[id].opinion = opinion;
    }

    pub fn set_reputation(&mut self, id: usize, reputation: f64) {
        self.agents[id].reputation = reputation;
    }

    /// Number of agents holding opinion 1
    pub fn count_opinion_one(&self) -> usize {
        self.agents
            .iter()
            .filter(|a| a.opinion == Opinion::One)
            .count()
    }

    /// Fraction of agents holding opinion 1
    pub fn opinion_fraction(&self) -> f64 {
        if self.agents.is_empty() {
            return 0.0;
        }
        self.count_opinion_one() as f64 / self.agents.len() as f64
    }

    /// Larger of the two opinion fractions
    pub fn consensus(&self) -> f64 {
        consensus_share(self.opinion_fraction())
    }

    pub fn mean_reputation(&self) -> f64 {
        if self.agents.is_empty() {
            return 0.0;
        }
        self.agents.iter().map(|a| a.reputation).sum::<f64>() / self.agents.len() as f64
    }

    /// Serializable copy of the current state.
    pub fn snapshot(&self, step: u64, network: &Network) -> PopulationSnapshot {
        PopulationSnapshot {
            step,
            opinion_fraction: self.opinion_fraction(),
            consensus: self.consensus(),
            mean_reputation: self.mean_reputation(),
            agents: self
                .agents
                .iter()
                .map(|a| AgentSnapshot {
                    id: a.id,
                    opinion: a.opinion.as_u8(),
                    reputation: a.reputation,
                    degree: network.degree(a.id),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_insertion_order() {
        let population =
            Population::from_opinions([Opinion::One, Opinion::Zero, Opinion::One], 1.0);

        assert_eq!(population.len(), 3);
        for (index, agent) in population.agents().iter().enumerate() {
            assert_eq!(agent.id, index);
        }
        assert_eq!(population.opinion(1), Opinion::Zero);
    }

    #[test]
    fn test_aggregates() {
        let mut population = Population::from_opinions(
            [Opinion::One, Opinion::Zero, Opinion::One, Opinion::One],
            INITIAL_REPUTATION,
        );
        population.set_reputation(0, 3.0);

        assert_eq!(population.count_opinion_one(), 3);
        assert_eq!(population.opinion_fraction(), 0.75);
        assert_eq!(population.consensus(), 0.75);
        assert_eq!(population.mean_reputation(), 1.5);
    }

    #[test]
    fn test_snapshot_includes_degree() {
        let population = Population::from_opinions([Opinion::One, Opinion::Zero], 1.0);
        let network = Network::from_edges(2, [(0, 1)]).unwrap();

        let snapshot = population.snapshot(7, &network);

        assert_eq!(snapshot.step, 7);
        assert_eq!(snapshot.agents.len(), 2);
        assert_eq!(snapshot.agents[0].opinion, 1);
        assert_eq!(snapshot.agents[1].degree, 1);
        assert_eq!(snapshot.consensus, 0.5);
    }

    #[test]
    fn test_opinion_conversions() {
        assert_eq!(u8::from(Opinion::One), 1);
        assert_eq!(Opinion::from_bool(false), Opinion::Zero);
    }
}
