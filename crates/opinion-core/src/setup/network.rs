//! Network Providers
//!
//! Anything that can produce a fixed undirected graph for a run. The built-in
//! provider is the G(n, p) random graph with `p = k / (n - 1)`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::components::network::Network;
use crate::error::ConfigError;

/// Mixed into the run seed so the graph stream never replays the shared
/// simulation stream, which is seeded with the raw run seed.
pub const NETWORK_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Produces the interaction network for a run.
pub trait NetworkProvider {
    /// Generates a graph with `nodes` nodes labeled `0..nodes` and expected
    /// average degree `avg_degree`.
    fn generate(&self, nodes: usize, avg_degree: f64, seed: u64) -> Result<Network, ConfigError>;
}

/// G(n, p) random graph.
///
/// Draws from its own generator, seeded from the run seed xor
/// [`NETWORK_SEED_SALT`], so building the graph neither consumes nor mirrors
/// the draws of the simulation's shared stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErdosRenyi;

impl ErdosRenyi {
    /// Generator used for the edge layout of a run with `seed`.
    pub fn network_rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed ^ NETWORK_SEED_SALT)
    }
}

impl NetworkProvider for ErdosRenyi {
    fn generate(&self, nodes: usize, avg_degree: f64, seed: u64) -> Result<Network, ConfigError> {
        let mut rng = Self::network_rng(seed);
        let p = if nodes > 1 {
            avg_degree / (nodes as f64 - 1.0)
        } else {
            0.0
        };
        let edges = gnp_edges(nodes, p, &mut rng);
        Network::from_edges(nodes, edges)
    }
}

/// Edge list of G(n, p).
///
/// Walks the lower triangle with geometric skips between successes, so the
/// cost is proportional to `n + edges` instead of `n^2`.
pub fn gnp_edges<R: Rng + ?Sized>(nodes: usize, p: f64, rng: &mut R) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    if nodes < 2 || !(p > 0.0) {
        return edges;
    }
    if p >= 1.0 {
        for v in 1..nodes {
            for w in 0..v {
                edges.push((v, w));
            }
        }
        return edges;
    }

    let log_q = (-p).ln_1p();
    let n = nodes as i64;
    let mut v: i64 = 1;
    let mut w: i64 = -1;
    while v < n {
        let log_r = (1.0 - rng.gen::<f64>()).ln();
        // Saturating cast: a huge skip just walks past the end
        let skip = (log_r / log_q).floor() as i64;
        w = w.saturating_add(1).saturating_add(skip);
        while w >= v && v < n {
            w -= v;
            v += 1;
        }
        if v < n {
            edges.push((v as usize, w as usize));
        }
    }
    edges
}
