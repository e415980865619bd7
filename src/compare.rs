//! Runs both strategies on independent copies of the same problem.

use crate::error::PlacementError;
use crate::round::{PlacementConfig, PlacementResult, PlacementRunner};
use crate::store::EntityStore;
use crate::strategy::{Greedy, Heuristic};

/// Runs [`Greedy`] and then [`Heuristic`] on `store`.
///
/// Each run clones the store and seeds its own random source from
/// `config.seed`, so the two never share state and each result matches a
/// standalone [`PlacementRunner::run`] with the same config. With the
/// `parallel` feature the runs execute concurrently on the rayon pool.
///
/// # Examples
///
/// ```
/// use u_placement::compare::run_both;
/// use u_placement::report::Comparison;
/// use u_placement::round::PlacementConfig;
/// use u_placement::store::{Candidate, EntityStore, Slot};
///
/// let store = EntityStore::new(
///     vec![
///         Candidate::new("S1", ["A", "B"], 3.0),
///         Candidate::new("S2", ["A"], 2.5),
///     ],
///     vec![Slot::new("A", 1), Slot::new("B", 1)],
/// )
/// .unwrap();
///
/// let (greedy, heuristic) = run_both(&store, &PlacementConfig::default().with_seed(3)).unwrap();
/// assert!(greedy.is_complete() && heuristic.is_complete());
/// println!("{}", Comparison::new(&greedy, &heuristic));
/// ```
pub fn run_both(
    store: &EntityStore,
    config: &PlacementConfig,
) -> Result<(PlacementResult, PlacementResult), PlacementError> {
    let (greedy, heuristic) = join(
        || PlacementRunner::run(&Greedy, store, config),
        || PlacementRunner::run(&Heuristic, store, config),
    );
    Ok((greedy?, heuristic?))
}

#[cfg(feature = "parallel")]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

#[cfg(not(feature = "parallel"))]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    (a(), b())
}
