//! Metrics History
//!
//! Time series of population-level statistics, appended at recording instants.
//!
//! The five sequences are stored as parallel vectors (the layout plotting code
//! reads) but can only grow one whole sample at a time, so they always have the
//! same length.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One recorded row of population statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSample {
    /// Step index at which the sample was taken
    pub step: u64,
    /// Fraction of agents holding opinion 1
    pub opinion_fraction: f64,
    /// Larger of the two opinion fractions
    pub consensus: f64,
    /// Mean reputation across all agents
    pub mean_reputation: f64,
    /// Majority vote outcome of the tick (0 or 1)
    pub vote_outcome: u8,
}

/// Append-only parallel time series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHistory")]
pub struct MetricsHistory {
    t_history: Vec<u64>,
    opinion_history: Vec<f64>,
    consensus_history: Vec<f64>,
    reputation_history: Vec<f64>,
    vote_outcome_history: Vec<u8>,
}

impl MetricsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one sample to every sequence.
    pub fn push(&mut self, sample: MetricsSample) {
        self.t_history.push(sample.step);
        self.opinion_history.push(sample.opinion_fraction);
        self.consensus_history.push(sample.consensus);
        self.reputation_history.push(sample.mean_reputation);
        self.vote_outcome_history.push(sample.vote_outcome);
    }

    pub fn len(&self) -> usize {
        self.t_history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t_history.is_empty()
    }

    pub fn t_history(&self) -> &[u64] {
        &self.t_history
    }

    pub fn opinion_history(&self) -> &[f64] {
        &self.opinion_history
    }

    pub fn consensus_history(&self) -> &[f64] {
        &self.consensus_history
    }

    pub fn reputation_history(&self) -> &[f64] {
        &self.reputation_history
    }

    pub fn vote_outcome_history(&self) -> &[u8] {
        &self.vote_outcome_history
    }

    /// Returns the sample recorded at `index`, if any.
    pub fn get(&self, index: usize) -> Option<MetricsSample> {
        Some(MetricsSample {
            step: *self.t_history.get(index)?,
            opinion_fraction: self.opinion_history[index],
            consensus: self.consensus_history[index],
            mean_reputation: self.reputation_history[index],
            vote_outcome: self.vote_outcome_history[index],
        })
    }

    /// Most recently recorded sample.
    pub fn last(&self) -> Option<MetricsSample> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Iterates recorded samples in recording order.
    pub fn samples(&self) -> impl Iterator<Item = MetricsSample> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

/// Unchecked wire form used during deserialization.
#[derive(Deserialize)]
struct RawHistory {
    t_history: Vec<u64>,
    opinion_history: Vec<f64>,
    consensus_history: Vec<f64>,
    reputation_history: Vec<f64>,
    vote_outcome_history: Vec<u8>,
}

impl TryFrom<RawHistory> for MetricsHistory {
    type Error = HistoryLengthMismatch;

    fn try_from(raw: RawHistory) -> Result<Self, Self::Error> {
        let lengths = [
            raw.t_history.len(),
            raw.opinion_history.len(),
            raw.consensus_history.len(),
            raw.reputation_history.len(),
            raw.vote_outcome_history.len(),
        ];
        if lengths.iter().any(|&len| len != lengths[0]) {
            return Err(HistoryLengthMismatch(lengths));
        }
        Ok(Self {
            t_history: raw.t_history,
            opinion_history: raw.opinion_history,
            consensus_history: raw.consensus_history,
            reputation_history: raw.reputation_history,
            vote_outcome_history: raw.vote_outcome_history,
        })
    }
}

/// Serialized history whose sequences differ in length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLengthMismatch(pub [usize; 5]);

impl fmt::Display for HistoryLengthMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "metrics history sequences differ in length: {:?}", self.0)
    }
}

impl std::error::Error for HistoryLengthMismatch {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(step: u64, fraction: f64) -> MetricsSample {
        MetricsSample {
            step,
            opinion_fraction: fraction,
            consensus: crate::consensus_share(fraction),
            mean_reputation: 1.0,
            vote_outcome: u8::from(fraction > 0.5),
        }
    }

    #[test]
    fn test_push_keeps_sequences_aligned() {
        let mut history = MetricsHistory::new();
        assert!(history.is_empty());

        history.push(sample(5, 0.25));
        history.push(sample(10, 0.6));

        assert_eq!(history.len(), 2);
        assert_eq!(history.t_history(), &[5, 10]);
        assert_eq!(history.opinion_history().len(), 2);
        assert_eq!(history.consensus_history(), &[0.75, 0.6]);
        assert_eq!(history.reputation_history().len(), 2);
        assert_eq!(history.vote_outcome_history(), &[0, 1]);
    }

    #[test]
    fn test_get_and_last() {
        let mut history = MetricsHistory::new();
        assert_eq!(history.last(), None);

        history.push(sample(5, 0.25));
        history.push(sample(10, 0.75));

        assert_eq!(history.get(0), Some(sample(5, 0.25)));
        assert_eq!(history.last(), Some(sample(10, 0.75)));
        assert_eq!(history.get(2), None);
        assert_eq!(history.samples().count(), 2);
    }

    #[test]
    fn test_json_uses_parallel_sequences() {
        let mut history = MetricsHistory::new();
        history.push(sample(5, 0.5));

        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json["t_history"], serde_json::json!([5]));
        assert_eq!(json["vote_outcome_history"], serde_json::json!([0]));

        let parsed: MetricsHistory = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, history);
    }

    #[test]
    fn test_deserialize_rejects_ragged_sequences() {
        let json = r#"{
            "t_history": [5, 10],
            "opinion_history": [0.5],
            "consensus_history": [0.5],
            "reputation_history": [1.0],
            "vote_outcome_history": [1]
        }"#;

        let result: Result<MetricsHistory, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
