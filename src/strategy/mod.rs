//! Placement strategies.
//!
//! - [`Greedy`]: candidates in descending priority, each taking the first
//!   open slot of its preference list.
//! - [`Heuristic`]: every candidate–slot pair is scored at once and pairs
//!   are committed best-first, so a lower-priority candidate can win a
//!   slot when its pairing scores higher.
//!
//! Both fall back to the same forced placement in phase 3.

mod greedy;
mod heuristic;

pub use greedy::Greedy;
pub use heuristic::{match_score, Heuristic, MatchFeatures};

use crate::ranking::{RankEngine, RankRule};
use crate::store::EntityStore;

/// Ranks candidate indices by their priority score.
struct HigherPriority;

impl RankRule<usize, EntityStore> for HigherPriority {
    fn name(&self) -> &str {
        "HigherPriority"
    }

    fn score(&self, &candidate: &usize, store: &EntityStore) -> f64 {
        store.candidate(candidate).priority()
    }
}

/// `unplaced` in descending priority; equal priorities keep input order.
pub(crate) fn priority_order(store: &EntityStore, unplaced: &[usize]) -> Vec<usize> {
    RankEngine::new()
        .with_rule(HigherPriority)
        .sort_indices(unplaced, store)
        .into_iter()
        .map(|i| unplaced[i])
        .collect()
}

/// Phase 3 pass: in priority order, each candidate takes the first open
/// slot in slot order. One operation per placement.
pub(crate) fn forced_round(
    store: &mut EntityStore,
    unplaced: &[usize],
    operations: &mut usize,
) -> Vec<usize> {
    let mut placed = Vec::new();
    for candidate in priority_order(store, unplaced) {
        let Some(slot) = store.first_available() else {
            break;
        };
        *operations += 1;
        store.place(candidate, slot);
        placed.push(candidate);
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Candidate, Slot};

    fn store() -> EntityStore {
        EntityStore::new(
            vec![
                Candidate::new("S1", ["B"], 2.0),
                Candidate::new("S2", ["B"], 3.5),
                Candidate::new("S3", ["B"], 2.0),
                Candidate::new("S4", ["B"], 1.0),
            ],
            vec![Slot::new("A", 2), Slot::new("B", 1)],
        )
        .unwrap()
    }

    #[test]
    fn test_priority_order_is_stable() {
        let s = store();
        assert_eq!(priority_order(&s, &[0, 1, 2, 3]), vec![1, 0, 2, 3]);
        assert_eq!(priority_order(&s, &[3, 2, 0]), vec![2, 0, 3]);
    }

    #[test]
    fn test_forced_round_fills_in_slot_order() {
        let mut s = store();
        let mut ops = 0;
        let placed = forced_round(&mut s, &[0, 1, 2, 3], &mut ops);

        assert_eq!(placed, vec![1, 0, 2]);
        assert_eq!(ops, 3);
        assert_eq!(s.candidate(1).assigned_index(), Some(0));
        assert_eq!(s.candidate(0).assigned_index(), Some(0));
        assert_eq!(s.candidate(2).assigned_index(), Some(1));
        assert!(!s.candidate(3).is_placed());
    }
}
