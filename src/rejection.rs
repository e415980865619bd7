//! Stochastic post-placement rejection.

use rand::Rng;

use crate::store::EntityStore;

/// Undoes each placement in `placed` independently with probability
/// `probability`.
///
/// Candidates are evaluated in input order, one uniform draw in `[0, 1)`
/// each; a draw below `probability` revokes the placement and returns the
/// capacity to its slot. Returns the rejected candidates in input order.
///
/// # Panics
///
/// If a candidate in `placed` is not currently placed.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_placement::rejection::reject_placements;
/// use u_placement::store::{Candidate, EntityStore, Slot};
///
/// let mut store = EntityStore::new(
///     vec![Candidate::new("S1", ["A"], 2.0)],
///     vec![Slot::new("A", 1)],
/// )
/// .unwrap();
/// store.place(0, 0);
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let rejected = reject_placements(&mut store, &[0], 1.0, &mut rng);
/// assert_eq!(rejected, vec![0]);
/// assert_eq!(store.slot(0).remaining(), 1);
/// ```
pub fn reject_placements<R: Rng>(
    store: &mut EntityStore,
    placed: &[usize],
    probability: f64,
    rng: &mut R,
) -> Vec<usize> {
    let mut rejected = Vec::new();
    for &candidate in placed {
        if rng.random::<f64>() < probability {
            store.revoke(candidate);
            rejected.push(candidate);
        }
    }
    rejected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Candidate, Slot};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn placed_store(n: usize) -> EntityStore {
        let candidates = (0..n)
            .map(|i| Candidate::new(format!("S{i}"), ["A"], 2.0))
            .collect();
        let mut store = EntityStore::new(candidates, vec![Slot::new("A", n)]).unwrap();
        for i in 0..n {
            store.place(i, 0);
        }
        store
    }

    #[test]
    fn test_zero_probability_rejects_nobody() {
        let mut store = placed_store(20);
        let placed: Vec<usize> = (0..20).collect();
        let mut rng = StdRng::seed_from_u64(42);

        assert!(reject_placements(&mut store, &placed, 0.0, &mut rng).is_empty());
        assert_eq!(store.placed_count(), 20);
    }

    #[test]
    fn test_certain_rejection_reverts_everyone() {
        let mut store = placed_store(5);
        let placed: Vec<usize> = (0..5).collect();
        let mut rng = StdRng::seed_from_u64(42);

        let rejected = reject_placements(&mut store, &placed, 1.0, &mut rng);
        assert_eq!(rejected, placed);
        assert_eq!(store.placed_count(), 0);
        assert_eq!(store.slot(0).remaining(), 5);
        assert!(store.check_invariants().is_ok());
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let placed: Vec<usize> = (0..50).collect();

        let mut a = placed_store(50);
        let mut b = placed_store(50);
        let ra = reject_placements(&mut a, &placed, 0.3, &mut StdRng::seed_from_u64(9));
        let rb = reject_placements(&mut b, &placed, 0.3, &mut StdRng::seed_from_u64(9));

        assert_eq!(ra, rb);
        assert!(!ra.is_empty() && ra.len() < 50);
    }

    #[test]
    fn test_rejected_keep_input_order() {
        let mut store = placed_store(30);
        let placed: Vec<usize> = (0..30).rev().collect();
        let rejected =
            reject_placements(&mut store, &placed, 0.5, &mut StdRng::seed_from_u64(3));

        let positions: Vec<usize> = rejected
            .iter()
            .map(|r| placed.iter().position(|p| p == r).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(store.check_invariants().is_ok());
    }
}
