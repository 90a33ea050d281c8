//! Tick Phases
//!
//! The four phases of a tick, run in this order: vote, reputation, Fermi
//! imitation, recording. Each phase is a plain function over the state plus a
//! thin ECS system wrapper used by the schedule.

pub mod fermi;
pub mod record;
pub mod reputation;
pub mod vote;

pub use fermi::{fermi_event, fermi_phase, fermi_probability, run_fermi_events, FermiOutcome, FermiStats};
pub use record::{record_metrics, sample_population, MetricsRecorder};
pub use reputation::{reputation_phase, update_reputations, ReputationStats};
pub use vote::{tally_votes, vote_phase};
