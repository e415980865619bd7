//! Round controller shared by all placement strategies.
//!
//! Drives the phase/iteration state machine: unplaced-set computation,
//! progress tracking, phase escalation and termination. Strategies plug
//! in through [`PlacementStrategy`] and only decide the placements of a
//! single round.
//!
//! # Phases
//!
//! | Phase | Placement | Rejection |
//! |---|---|---|
//! | 1 [`Phase::Preference`] | preferred slots only | yes |
//! | 2 [`Phase::PreferenceThenOpen`] | preferred, then any open slot | yes |
//! | 3 [`Phase::Forced`] | first open slot | no |
//!
//! The phase advances after `stall_limit` consecutive rounds that placed
//! nobody ([`next_phase`]).

mod config;
mod phase;
mod runner;
mod types;

pub use config::{PlacementConfig, DEFAULT_REJECTION_PROBABILITY, DEFAULT_STALL_LIMIT};
pub use phase::{next_phase, Phase, PhasePolicy, PhaseTracker};
pub use runner::{PlacementResult, PlacementRunner, Termination};
pub use types::PlacementStrategy;
