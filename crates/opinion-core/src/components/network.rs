//! Interaction Network
//!
//! Undirected graph stored as sorted adjacency vectors. Built once per run and
//! read-only afterwards; it never owns agent state.

use bevy_ecs::prelude::*;
use opinion_events::NetworkSummary;
use rand::Rng;

use crate::error::ConfigError;

/// Resource: the fixed interaction network
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Network {
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Network {
    /// Network of `nodes` isolated nodes.
    pub fn empty(nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); nodes],
            edge_count: 0,
        }
    }

    /// Builds a network from undirected edges.
    ///
    /// Self-loops and repeated edges are dropped.
    pub fn from_edges(
        nodes: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, ConfigError> {
        let mut adjacency = vec![Vec::new(); nodes];
        for (a, b) in edges {
            if a >= nodes || b >= nodes {
                return Err(ConfigError::EdgeOutOfRange(a, b));
            }
            if a == b {
                continue;
            }
            adjacency[a].push(b);
            adjacency[b].push(a);
        }

        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
            neighbors.dedup();
        }
        let edge_count = adjacency.iter().map(Vec::len).sum::<usize>() / 2;

        Ok(Self {
            adjacency,
            edge_count,
        })
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Neighbors of `node` in ascending order. Empty for unknown nodes.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, node: usize) -> usize {
        self.neighbors(node).len()
    }

    pub fn is_isolated(&self, node: usize) -> bool {
        self.neighbors(node).is_empty()
    }

    pub fn isolated_count(&self) -> usize {
        self.adjacency.iter().filter(|n| n.is_empty()).count()
    }

    /// Samples one neighbor of `node` uniformly.
    ///
    /// Consumes exactly one draw when the node has neighbors and none when it
    /// is isolated.
    pub fn sample_neighbor<R: Rng + ?Sized>(&self, node: usize, rng: &mut R) -> Option<usize> {
        let neighbors = self.neighbors(node);
        if neighbors.is_empty() {
            return None;
        }
        Some(neighbors[rng.gen_range(0..neighbors.len())])
    }

    /// Degree statistics.
    pub fn summary(&self) -> NetworkSummary {
        let nodes = self.node_count();
        let degrees = self.adjacency.iter().map(Vec::len);
        NetworkSummary {
            nodes,
            edges: self.edge_count,
            mean_degree: if nodes == 0 {
                0.0
            } else {
                2.0 * self.edge_count as f64 / nodes as f64
            },
            min_degree: degrees.clone().min().unwrap_or(0),
            max_degree: degrees.max().unwrap_or(0),
            isolated: self.isolated_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_from_edges_is_undirected_and_sorted() {
        let network = Network::from_edges(4, [(2, 0), (0, 1), (3, 0)]).unwrap();

        assert_eq!(network.neighbors(0), &[1, 2, 3]);
        assert_eq!(network.neighbors(2), &[0]);
        assert_eq!(network.edge_count(), 3);
        assert_eq!(network.degree(0), 3);
    }

    #[test]
    fn test_from_edges_drops_loops_and_duplicates() {
        let network = Network::from_edges(3, [(0, 1), (1, 0), (2, 2)]).unwrap();

        assert_eq!(network.edge_count(), 1);
        assert!(network.is_isolated(2));
        assert_eq!(network.isolated_count(), 1);
    }

    #[test]
    fn test_from_edges_rejects_unknown_nodes() {
        let result = Network::from_edges(2, [(0, 5)]);
        assert!(matches!(result, Err(ConfigError::EdgeOutOfRange(0, 5))));
    }

    #[test]
    fn test_sample_neighbor_on_isolated_node_consumes_nothing() {
        let network = Network::empty(3);
        let mut rng = SmallRng::seed_from_u64(5);
        let mut reference = SmallRng::seed_from_u64(5);

        assert_eq!(network.sample_neighbor(1, &mut rng), None);
        assert_eq!(rng.gen::<u64>(), reference.gen::<u64>());
    }

    #[test]
    fn test_sample_neighbor_stays_in_neighborhood() {
        let network = Network::from_edges(5, [(0, 1), (0, 3), (0, 4)]).unwrap();
        let mut rng = SmallRng::seed_from_u64(11);

        for _ in 0..200 {
            let picked = network.sample_neighbor(0, &mut rng).unwrap();
            assert!(network.neighbors(0).contains(&picked));
        }
    }

    #[test]
    fn test_summary() {
        let network = Network::from_edges(4, [(0, 1), (1, 2)]).unwrap();
        let summary = network.summary();

        assert_eq!(summary.nodes, 4);
        assert_eq!(summary.edges, 2);
        assert_eq!(summary.mean_degree, 1.0);
        assert_eq!(summary.min_degree, 0);
        assert_eq!(summary.max_degree, 2);
        assert_eq!(summary.isolated, 1);
    }
}
