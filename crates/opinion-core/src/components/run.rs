//! Run State
//!
//! Tick counter and per-tick scratch values owned by the tick driver.

use bevy_ecs::prelude::*;

use super::agent::Opinion;

/// Resource: progress of the run
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    /// Ticks started so far; 0 before the first tick
    pub step_count: u64,
    /// Configured number of ticks
    pub total_steps: u64,
    /// Majority outcome of the current tick's vote phase
    pub last_vote: Option<Opinion>,
}

impl RunState {
    pub fn new(total_steps: u64) -> Self {
        Self {
            step_count: 0,
            total_steps,
            last_vote: None,
        }
    }

    /// Starts the next tick.
    pub fn advance_tick(&mut self) {
        self.step_count += 1;
        self.last_vote = None;
    }

    pub fn is_finished(&self) -> bool {
        self.step_count >= self.total_steps
    }

    pub fn remaining(&self) -> u64 {
        self.total_steps.saturating_sub(self.step_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_tick() {
        let mut state = RunState::new(2);
        assert_eq!(state.step_count, 0);
        assert!(!state.is_finished());

        state.last_vote = Some(Opinion::One);
        state.advance_tick();
        assert_eq!(state.step_count, 1);
        assert_eq!(state.last_vote, None);
        assert_eq!(state.remaining(), 1);

        state.advance_tick();
        assert!(state.is_finished());
        assert_eq!(state.remaining(), 0);
    }

    #[test]
    fn test_zero_step_run_is_finished() {
        assert!(RunState::new(0).is_finished());
    }
}
