//! Property tests: store invariants and termination hold for arbitrary
//! instances under both strategies.

use proptest::prelude::*;
use u_placement::metrics::{satisfaction_score, FIRST_CHOICE_POINTS};
use u_placement::report::placement_report;
use u_placement::round::{PlacementConfig, PlacementResult, PlacementRunner, Termination};
use u_placement::store::{Candidate, EntityStore, Slot};
use u_placement::strategy::{Greedy, Heuristic};

fn instance() -> impl Strategy<Value = EntityStore> {
    let capacities = prop::collection::vec(0usize..4, 1..6);
    capacities.prop_flat_map(|caps| {
        let slot_count = caps.len();
        // Index `slot_count` stands for an id no slot carries.
        let candidate = (
            prop::collection::vec(0..=slot_count, 0..6),
            0.0f64..4.0,
        );
        (Just(caps), prop::collection::vec(candidate, 0..16)).prop_map(|(caps, cands)| {
            let slots = caps
                .iter()
                .enumerate()
                .map(|(i, &cap)| Slot::new(format!("F{i}"), cap))
                .collect();
            let candidates = cands
                .into_iter()
                .enumerate()
                .map(|(i, (prefs, priority))| {
                    Candidate::new(
                        format!("S{i}"),
                        prefs.into_iter().map(|p| format!("F{p}")),
                        priority,
                    )
                })
                .collect();
            EntityStore::new(candidates, slots).unwrap()
        })
    })
}

fn check_outcome(store: &EntityStore, result: &PlacementResult) -> Result<(), TestCaseError> {
    let final_store = &result.store;
    prop_assert_eq!(final_store.check_invariants(), Ok(()));

    let n = store.candidates().len();
    let capacity = store.total_capacity();
    let placed = final_store.placed_count();

    if capacity >= n {
        prop_assert_eq!(result.termination, Termination::AllPlaced);
        prop_assert_eq!(placed, n);
    } else {
        prop_assert_eq!(result.termination, Termination::CapacityExhausted);
        prop_assert_eq!(placed, capacity);
        prop_assert!(final_store.slots().iter().all(|s| s.remaining() == 0));
    }

    prop_assert_eq!(result.metrics.satisfaction, satisfaction_score(final_store));
    prop_assert!(result.metrics.satisfaction <= FIRST_CHOICE_POINTS * placed);
    prop_assert!(result.metrics.escalations.len() <= 2);
    prop_assert_eq!(store.placed_count(), 0);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn greedy_keeps_invariants(store in instance(), seed in any::<u64>()) {
        let config = PlacementConfig::default().with_seed(seed);
        let result = PlacementRunner::run(&Greedy, &store, &config).unwrap();
        check_outcome(&store, &result)?;
    }

    #[test]
    fn heuristic_keeps_invariants(store in instance(), seed in any::<u64>()) {
        let config = PlacementConfig::default().with_seed(seed);
        let result = PlacementRunner::run(&Heuristic, &store, &config).unwrap();
        check_outcome(&store, &result)?;
    }

    #[test]
    fn seeded_runs_repeat(store in instance(), seed in any::<u64>()) {
        let config = PlacementConfig::default().with_seed(seed);
        let a = PlacementRunner::run(&Heuristic, &store, &config).unwrap();
        let b = PlacementRunner::run(&Heuristic, &store, &config).unwrap();
        prop_assert_eq!(placement_report(&a.store), placement_report(&b.store));
        prop_assert_eq!(a.metrics.iterations, b.metrics.iterations);
        prop_assert_eq!(a.metrics.operations, b.metrics.operations);
        prop_assert_eq!(a.metrics.rejections, b.metrics.rejections);
    }

    #[test]
    fn certain_acceptance_never_rejects(store in instance(), seed in any::<u64>()) {
        let config = PlacementConfig::default()
            .with_rejection_probability(0.0)
            .with_seed(seed);
        let result = PlacementRunner::run(&Greedy, &store, &config).unwrap();
        prop_assert_eq!(result.metrics.rejections, 0);
        check_outcome(&store, &result)?;
    }
}
