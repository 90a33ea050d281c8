//! Recorder
//!
//! Appends a metrics sample whenever `step_count % record_every == 0`.
//! No smoothing and nothing is filled in for skipped steps.

use bevy_ecs::prelude::*;
use opinion_events::{MetricsHistory, MetricsSample};
use tracing::{debug, warn};

use crate::components::agent::{Opinion, Population};
use crate::components::run::RunState;

/// Summary statistics of the population at `step`.
pub fn sample_population(step: u64, population: &Population, vote: Opinion) -> MetricsSample {
    MetricsSample {
        step,
        opinion_fraction: population.opinion_fraction(),
        consensus: population.consensus(),
        mean_reputation: population.mean_reputation(),
        vote_outcome: vote.as_u8(),
    }
}

/// Resource: recording cadence and the accumulated history
#[derive(Resource, Debug, Clone)]
pub struct MetricsRecorder {
    record_every: u64,
    history: MetricsHistory,
}

impl MetricsRecorder {
    /// `record_every` of 0 is treated as 1.
    pub fn new(record_every: u64) -> Self {
        Self {
            record_every: record_every.max(1),
            history: MetricsHistory::new(),
        }
    }

    pub fn record_every(&self) -> u64 {
        self.record_every
    }

    /// Check if a sample is due at `step`
    pub fn should_record(&self, step: u64) -> bool {
        step % self.record_every == 0
    }

    /// Appends a sample if one is due. Returns the appended sample.
    pub fn record(
        &mut self,
        step: u64,
        population: &Population,
        vote: Opinion,
    ) -> Option<MetricsSample> {
        if !self.should_record(step) {
            return None;
        }
        let sample = sample_population(step, population, vote);
        self.history.push(sample);
        Some(sample)
    }

    pub fn history(&self) -> &MetricsHistory {
        &self.history
    }

    pub fn into_history(self) -> MetricsHistory {
        self.history
    }
}

/// System: record metrics at the end of the tick
pub fn record_metrics(
    run_state: Res<RunState>,
    population: Res<Population>,
    mut recorder: ResMut<MetricsRecorder>,
) {
    let Some(vote) = run_state.last_vote else {
        warn!(step = run_state.step_count, "no vote outcome for this tick, skipping record");
        return;
    };

    if let Some(sample) = recorder.record(run_state.step_count, &population, vote) {
        debug!(
            step = sample.step,
            opinion_fraction = sample.opinion_fraction,
            consensus = sample.consensus,
            mean_reputation = sample.mean_reputation,
            vote = sample.vote_outcome,
            "recorded metrics"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population() -> Population {
        Population::from_opinions([Opinion::One, Opinion::Zero, Opinion::Zero, Opinion::Zero], 2.0)
    }

    #[test]
    fn test_records_only_on_interval() {
        let mut recorder = MetricsRecorder::new(5);
        let population = population();

        for step in 1..=12 {
            recorder.record(step, &population, Opinion::Zero);
        }

        assert_eq!(recorder.history().t_history(), &[5, 10]);
        assert_eq!(recorder.history().len(), 2);
    }

    #[test]
    fn test_sample_fields() {
        let sample = sample_population(10, &population(), Opinion::Zero);

        assert_eq!(sample.step, 10);
        assert_eq!(sample.opinion_fraction, 0.25);
        assert_eq!(sample.consensus, 0.75);
        assert_eq!(sample.mean_reputation, 2.0);
        assert_eq!(sample.vote_outcome, 0);
    }

    #[test]
    fn test_record_every_one_records_each_step() {
        let mut recorder = MetricsRecorder::new(1);
        let population = population();

        for step in 1..=3 {
            assert!(recorder.record(step, &population, Opinion::One).is_some());
        }
        assert_eq!(recorder.into_history().vote_outcome_history(), &[1, 1, 1]);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        assert_eq!(MetricsRecorder::new(0).record_every(), 1);
    }
}
