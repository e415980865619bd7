//! Round controller: the phased placement loop.
//!
//! # Algorithm
//!
//! 1. Clone and reset the store (each run owns private state)
//! 2. At each round:
//!    a. Stop if nobody is unplaced, or no slot has capacity left
//!    b. Let the strategy run one placement pass for the current phase
//!    c. Outside the forced phase, reject each new placement with the
//!       configured probability
//!    d. Escalate the phase after `stall_limit` rounds without placements
//! 3. Score the final assignment

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::config::PlacementConfig;
use super::phase::PhaseTracker;
use super::types::PlacementStrategy;
use crate::error::PlacementError;
use crate::metrics::{satisfaction_score, RunMetrics};
use crate::rejection::reject_placements;
use crate::sink::{LogSink, NullSink};
use crate::store::EntityStore;

const BANNER_WIDTH: usize = 50;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// Every candidate holds a slot.
    AllPlaced,
    /// Candidates remain but no slot has capacity left, so no later round
    /// could place anyone.
    CapacityExhausted,
    /// `max_iterations` rounds ran with candidates still unplaced.
    IterationLimit,
}

/// Result of a placement run.
#[derive(Debug, Clone)]
pub struct PlacementResult {
    /// Name of the strategy that produced this result.
    pub strategy: String,

    /// Final assignment state (the run's private copy).
    pub store: EntityStore,

    /// Cost and quality figures.
    pub metrics: RunMetrics,

    /// Why the loop stopped.
    pub termination: Termination,
}

impl PlacementResult {
    /// Candidates left without a slot.
    pub fn unplaced(&self) -> usize {
        self.store.candidates().len() - self.store.placed_count()
    }

    pub fn is_complete(&self) -> bool {
        self.termination == Termination::AllPlaced
    }
}

/// Executes a placement strategy under the phased round loop.
pub struct PlacementRunner;

impl PlacementRunner {
    /// Runs `strategy` on a private copy of `store`.
    ///
    /// The random source is seeded from `config.seed`, or from OS entropy
    /// when no seed is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_placement::round::{PlacementConfig, PlacementRunner};
    /// use u_placement::store::{Candidate, EntityStore, Slot};
    /// use u_placement::strategy::Greedy;
    ///
    /// let store = EntityStore::new(
    ///     vec![Candidate::new("S1", ["A", "B"], 3.1)],
    ///     vec![Slot::new("A", 0), Slot::new("B", 1)],
    /// )
    /// .unwrap();
    ///
    /// let config = PlacementConfig::default()
    ///     .with_rejection_probability(0.0)
    ///     .with_seed(42);
    /// let result = PlacementRunner::run(&Greedy, &store, &config).unwrap();
    ///
    /// assert!(result.is_complete());
    /// assert_eq!(result.metrics.satisfaction, 4);
    /// ```
    pub fn run<S: PlacementStrategy>(
        strategy: &S,
        store: &EntityStore,
        config: &PlacementConfig,
    ) -> Result<PlacementResult, PlacementError> {
        Self::run_with_sink(strategy, store, config, &mut NullSink)
    }

    /// Runs `strategy`, writing a transcript of the run to `sink`.
    pub fn run_with_sink<S: PlacementStrategy>(
        strategy: &S,
        store: &EntityStore,
        config: &PlacementConfig,
        sink: &mut dyn LogSink,
    ) -> Result<PlacementResult, PlacementError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::run_with_rng(strategy, store, config, &mut rng, sink)
    }

    /// Runs `strategy` with a caller-supplied random source.
    ///
    /// `config.seed` is ignored.
    ///
    /// # Errors
    ///
    /// [`PlacementError::InvalidConfig`] if `config` fails validation.
    pub fn run_with_rng<S: PlacementStrategy, R: Rng>(
        strategy: &S,
        store: &EntityStore,
        config: &PlacementConfig,
        rng: &mut R,
        sink: &mut dyn LogSink,
    ) -> Result<PlacementResult, PlacementError> {
        config.validate().map_err(PlacementError::InvalidConfig)?;

        let name = strategy.name();
        let mut store = store.clone();
        store.reset();

        let start = Instant::now();
        let mut tracker = PhaseTracker::new(config.stall_limit);
        let mut iterations = 0usize;
        let mut operations = 0usize;
        let mut rejections = 0usize;
        let mut escalations = Vec::new();

        banner(sink, &format!("{} STARTED", name.to_uppercase()));
        info!(
            event = "run_start",
            strategy = name,
            candidates = store.candidates().len(),
            slots = store.slots().len(),
            capacity = store.total_capacity(),
        );

        let termination = loop {
            let unplaced = store.unplaced();

            if unplaced.is_empty() {
                sink.line("");
                sink.line("All candidates placed!");
                break Termination::AllPlaced;
            }

            if !store.has_open_slot() {
                warn!(
                    event = "capacity_exhausted",
                    strategy = name,
                    iteration = iterations,
                    unplaced = unplaced.len(),
                );
                sink.line("");
                sink.line(&format!(
                    "No open capacity left; {} candidates remain unplaced",
                    unplaced.len()
                ));
                break Termination::CapacityExhausted;
            }

            if config.max_iterations > 0 && iterations >= config.max_iterations {
                warn!(
                    event = "iteration_limit",
                    strategy = name,
                    iteration = iterations,
                    unplaced = unplaced.len(),
                );
                sink.line("");
                sink.line(&format!(
                    "Iteration limit reached; {} candidates remain unplaced",
                    unplaced.len()
                ));
                break Termination::IterationLimit;
            }

            iterations += 1;
            let phase = tracker.phase();

            sink.line("");
            sink.line(&format!("--- Iteration {iterations} (Phase {phase}) ---"));
            sink.line(&format!("Unplaced candidates: {}", unplaced.len()));

            let placed = strategy.place_round(&mut store, &unplaced, phase, rng, &mut operations);
            sink.line(&format!("Placed this iteration: {}", placed.len()));

            let mut rejected = 0;
            if phase.policy().rejection && !placed.is_empty() {
                rejected =
                    reject_placements(&mut store, &placed, config.rejection_probability, rng).len();
                rejections += rejected;
                if rejected > 0 {
                    sink.line(&format!("Rejected candidates: {rejected}"));
                }
            }

            debug!(
                event = "round",
                strategy = name,
                iteration = iterations,
                phase = phase.number(),
                unplaced = unplaced.len(),
                placed = placed.len(),
                rejected,
            );
            debug_assert_eq!(store.check_invariants(), Ok(()));

            if let Some(escalation) = tracker.record_round(iterations, placed.len()) {
                info!(
                    event = "phase_escalation",
                    strategy = name,
                    iteration = escalation.iteration,
                    phase = escalation.phase.number(),
                );
                sink.line("");
                sink.line(&format!("*** Escalated to phase {} ***", escalation.phase));
                escalations.push(escalation);
            }
        };

        let metrics = RunMetrics {
            iterations,
            operations,
            rejections,
            escalations,
            elapsed: start.elapsed(),
            satisfaction: satisfaction_score(&store),
        };

        sink.line("");
        banner(sink, &format!("{} RESULTS", name.to_uppercase()));
        sink.line(&format!("Total iterations: {}", metrics.iterations));
        sink.line(&format!("Total operations: {}", metrics.operations));
        sink.line(&format!("Total time: {:.4} seconds", metrics.elapsed_secs()));
        sink.line(&format!("Satisfaction score: {}", metrics.satisfaction));
        sink.line(&format!("Total rejections: {}", metrics.rejections));

        info!(
            event = "run_end",
            strategy = name,
            termination = ?termination,
            iterations = metrics.iterations,
            operations = metrics.operations,
            rejections = metrics.rejections,
            satisfaction = metrics.satisfaction,
            duration_ms = metrics.elapsed.as_millis() as u64,
        );

        Ok(PlacementResult {
            strategy: name.to_string(),
            store,
            metrics,
            termination,
        })
    }
}

fn banner(sink: &mut dyn LogSink, title: &str) {
    let rule = "=".repeat(BANNER_WIDTH);
    sink.line(&rule);
    sink.line(title);
    sink.line(&rule);
}
