//! Greedy strategy: sequential preference scan in priority order.

use rand::Rng;

use super::{forced_round, priority_order};
use crate::round::{Phase, PlacementStrategy};
use crate::store::EntityStore;

/// Greedy placement.
///
/// Per round, unplaced candidates are taken in descending priority. Each
/// scans its preference list in order and takes the first slot with
/// capacity; in phase 2 a candidate with no open preferred slot takes a
/// uniformly random open slot instead. Placements are visible to the next
/// candidate of the same pass.
///
/// Operations: one per preference checked, one per random or forced
/// placement.
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl PlacementStrategy for Greedy {
    fn name(&self) -> &str {
        "Greedy"
    }

    fn place_round<R: Rng>(
        &self,
        store: &mut EntityStore,
        unplaced: &[usize],
        phase: Phase,
        rng: &mut R,
        operations: &mut usize,
    ) -> Vec<usize> {
        let policy = phase.policy();
        if policy.forced {
            return forced_round(store, unplaced, operations);
        }

        let mut placed = Vec::new();
        for candidate in priority_order(store, unplaced) {
            if !store.has_open_slot() {
                break;
            }

            let mut target = None;
            if policy.scan_preferences {
                for &pref in &store.candidate(candidate).preferred_slots {
                    *operations += 1;
                    if let Some(slot) = pref.filter(|&s| store.slot(s).is_open()) {
                        target = Some(slot);
                        break;
                    }
                }
            }

            if target.is_none() && policy.fallback_to_open {
                let open = store.available();
                *operations += 1;
                target = Some(open[rng.random_range(0..open.len())]);
            }

            if let Some(slot) = target {
                store.place(candidate, slot);
                placed.push(candidate);
            }
        }
        placed
    }
}
