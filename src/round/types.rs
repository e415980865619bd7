//! Core trait for placement strategies.

use rand::Rng;

use super::phase::Phase;
use crate::store::EntityStore;

/// One placement pass of a strategy.
///
/// The round controller owns the loop: it computes the unplaced set,
/// chooses the phase, applies rejection and decides termination. A
/// strategy only decides who goes where during a single round.
///
/// Implementations must mutate `store` exclusively through
/// [`EntityStore::place`], and only when the target slot is open.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_placement::round::{Phase, PlacementStrategy};
/// use u_placement::store::EntityStore;
///
/// /// Places everyone into the first open slot.
/// struct FirstFit;
///
/// impl PlacementStrategy for FirstFit {
///     fn name(&self) -> &str { "FirstFit" }
///
///     fn place_round<R: Rng>(
///         &self,
///         store: &mut EntityStore,
///         unplaced: &[usize],
///         _phase: Phase,
///         _rng: &mut R,
///         operations: &mut usize,
///     ) -> Vec<usize> {
///         let mut placed = Vec::new();
///         for &c in unplaced {
///             let Some(slot) = store.first_available() else { break };
///             *operations += 1;
///             store.place(c, slot);
///             placed.push(c);
///         }
///         placed
///     }
/// }
/// ```
pub trait PlacementStrategy: Send + Sync {
    /// Display name used in logs and reports.
    fn name(&self) -> &str;

    /// Runs one placement pass over `unplaced` (input order) under `phase`.
    ///
    /// Adds one unit to `operations` per candidate–slot evaluation and
    /// returns the candidates placed in this pass, in placement order.
    fn place_round<R: Rng>(
        &self,
        store: &mut EntityStore,
        unplaced: &[usize],
        phase: Phase,
        rng: &mut R,
        operations: &mut usize,
    ) -> Vec<usize>;
}
