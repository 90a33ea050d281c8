//! Population Spawning

use rand::Rng;

use crate::components::agent::{Opinion, Population, INITIAL_REPUTATION};

/// Spawns `size` agents with uniformly random opinions.
///
/// Draws one value per agent in id order from the shared stream; every agent
/// starts at [`INITIAL_REPUTATION`].
pub fn spawn_population<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Population {
    let opinions: Vec<Opinion> = (0..size).map(|_| Opinion::from_bool(rng.gen_bool(0.5))).collect();
    Population::from_opinions(opinions, INITIAL_REPUTATION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_population() {
        let mut rng = SmallRng::seed_from_u64(1);
        let population = spawn_population(1000, &mut rng);

        assert_eq!(population.len(), 1000);
        assert!(population
            .agents()
            .iter()
            .all(|a| a.reputation == INITIAL_REPUTATION));

        // Both opinions present in a large population
        let ones = population.count_opinion_one();
        assert!(ones > 400 && ones < 600, "unexpected split: {}", ones);
    }

    #[test]
    fn test_spawn_is_deterministic() {
        let a = spawn_population(64, &mut SmallRng::seed_from_u64(8));
        let b = spawn_population(64, &mut SmallRng::seed_from_u64(8));
        assert_eq!(a, b);
    }
}
