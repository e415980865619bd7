//! Run metrics and the satisfaction score.

use std::time::Duration;

use crate::round::Phase;
use crate::store::EntityStore;

/// Points for a placement at preference rank 0; each lower rank is worth
/// one point less.
pub const FIRST_CHOICE_POINTS: usize = 5;

/// A phase change, recorded at the round that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Escalation {
    /// One-based round number.
    pub iteration: usize,
    /// Phase entered.
    pub phase: Phase,
}

/// Cost and quality figures of one completed strategy run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunMetrics {
    /// Rounds executed.
    pub iterations: usize,

    /// Candidate–slot evaluations performed (strategy-specific unit).
    pub operations: usize,

    /// Placements undone by rejection, over all rounds.
    pub rejections: usize,

    /// Phase changes in the order they happened.
    pub escalations: Vec<Escalation>,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,

    /// Preference-weighted quality of the final assignment.
    pub satisfaction: usize,
}

impl RunMetrics {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Points earned by a placement at zero-based preference `rank`.
///
/// Ranks past the fifth earn nothing.
pub fn rank_points(rank: usize) -> usize {
    FIRST_CHOICE_POINTS.saturating_sub(rank)
}

/// Sum over placed candidates of [`rank_points`] for their assigned slot,
/// 0 for placements outside the preference list.
///
/// # Examples
///
/// ```
/// use u_placement::metrics::satisfaction_score;
/// use u_placement::store::{Candidate, EntityStore, Slot};
///
/// let mut store = EntityStore::new(
///     vec![Candidate::new("S1", ["A", "B"], 3.0)],
///     vec![Slot::new("A", 0), Slot::new("B", 1)],
/// )
/// .unwrap();
/// store.place(0, 1);
/// assert_eq!(satisfaction_score(&store), 4);
/// ```
pub fn satisfaction_score(store: &EntityStore) -> usize {
    store
        .candidates()
        .iter()
        .filter_map(|c| c.assigned_index().and_then(|slot| c.rank_of(slot)))
        .map(rank_points)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Candidate, Slot};

    fn store() -> EntityStore {
        EntityStore::new(
            vec![
                Candidate::new("S1", ["A", "B", "C", "D", "E"], 3.0),
                Candidate::new("S2", ["E", "D", "C", "B", "A"], 2.0),
                Candidate::new("S3", ["A", "B"], 1.0),
                Candidate::new("S4", ["A"], 1.0),
            ],
            vec![
                Slot::new("A", 1),
                Slot::new("B", 1),
                Slot::new("C", 1),
                Slot::new("D", 1),
                Slot::new("E", 1),
                Slot::new("F", 1),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_rank_points() {
        assert_eq!(rank_points(0), 5);
        assert_eq!(rank_points(4), 1);
        assert_eq!(rank_points(5), 0);
        assert_eq!(rank_points(9), 0);
    }

    #[test]
    fn test_empty_assignment_scores_zero() {
        assert_eq!(satisfaction_score(&store()), 0);
    }

    #[test]
    fn test_mixed_assignment() {
        let mut s = store();
        s.place(0, 0); // S1 -> A, rank 0: 5
        s.place(1, 4); // S2 -> E, rank 0: 5
        s.place(2, 1); // S3 -> B, rank 1: 4
        s.place(3, 5); // S4 -> F, non-preference: 0
        assert_eq!(satisfaction_score(&s), 14);
    }

    #[test]
    fn test_last_preference_scores_one() {
        let mut s = store();
        s.place(1, 0); // S2 -> A, rank 4
        assert_eq!(satisfaction_score(&s), 1);
    }
}
