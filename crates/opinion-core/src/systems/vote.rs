//! Vote Phase
//!
//! Majority tally over current opinions. The outcome is only recorded; no
//! other phase reads it.

use bevy_ecs::prelude::*;
use rand::Rng;

use crate::components::agent::{Opinion, Population};
use crate::components::run::RunState;
use crate::SimRng;

/// Majority opinion of the population.
///
/// An exact tie is broken by a fair coin, the only case that consumes a draw.
pub fn tally_votes<R: Rng + ?Sized>(population: &Population, rng: &mut R) -> Opinion {
    let ones = population.count_opinion_one();
    let n = population.len();
    match (2 * ones).cmp(&n) {
        std::cmp::Ordering::Greater => Opinion::One,
        std::cmp::Ordering::Less => Opinion::Zero,
        std::cmp::Ordering::Equal => Opinion::from_bool(rng.gen_bool(0.5)),
    }
}

/// System: tally the vote for this tick
pub fn vote_phase(
    population: Res<Population>,
    mut rng: ResMut<SimRng>,
    mut run_state: ResMut<RunState>,
) {
    run_state.last_vote = Some(tally_votes(&population, &mut rng.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_clear_majorities() {
        let mut rng = SmallRng::seed_from_u64(0);

        let mostly_one = Population::from_opinions([Opinion::One, Opinion::One, Opinion::Zero], 1.0);
        assert_eq!(tally_votes(&mostly_one, &mut rng), Opinion::One);

        let mostly_zero = Population::from_opinions([Opinion::Zero, Opinion::One, Opinion::Zero], 1.0);
        assert_eq!(tally_votes(&mostly_zero, &mut rng), Opinion::Zero);
    }

    #[test]
    fn test_majority_consumes_no_draw() {
        let population = Population::from_opinions([Opinion::One, Opinion::One, Opinion::Zero], 1.0);
        let mut rng = SmallRng::seed_from_u64(3);
        let mut reference = SmallRng::seed_from_u64(3);

        tally_votes(&population, &mut rng);
        assert_eq!(rng.gen::<u64>(), reference.gen::<u64>());
    }

    #[test]
    fn test_tie_consumes_one_draw() {
        let population = Population::from_opinions([Opinion::One, Opinion::Zero], 1.0);
        let mut rng = SmallRng::seed_from_u64(3);
        let mut reference = SmallRng::seed_from_u64(3);

        let outcome = tally_votes(&population, &mut rng);
        let expected = Opinion::from_bool(reference.gen_bool(0.5));

        assert_eq!(outcome, expected);
        assert_eq!(rng.gen::<u64>(), reference.gen::<u64>());
    }

    #[test]
    fn test_tie_breaks_both_ways() {
        let population = Population::from_opinions([Opinion::One, Opinion::Zero], 1.0);
        let mut rng = SmallRng::seed_from_u64(17);

        let ones = (0..200)
            .filter(|_| tally_votes(&population, &mut rng) == Opinion::One)
            .count();
        assert!(ones > 0 && ones < 200);
    }
}
