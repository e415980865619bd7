//! Arena of candidates and slots with identifier lookup.

use std::collections::HashMap;

use super::entity::{Candidate, Slot};
use crate::error::PlacementError;

/// Candidates and slots of one placement problem, plus their assignment
/// state.
///
/// Entities are addressed by arena index; identifier lookup goes through
/// [`candidate_index`](Self::candidate_index) and
/// [`slot_index`](Self::slot_index). Cloning yields a fully independent
/// copy, which is how each strategy run gets private state.
///
/// Assignment state is only changed by [`place`](Self::place),
/// [`revoke`](Self::revoke) and [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct EntityStore {
    candidates: Vec<Candidate>,
    slots: Vec<Slot>,
    candidate_ids: HashMap<String, usize>,
    slot_ids: HashMap<String, usize>,
}

impl EntityStore {
    /// Builds a store and resolves every preference against the slots.
    ///
    /// Incoming assignment state is discarded; the store starts reset.
    ///
    /// # Errors
    ///
    /// [`PlacementError::DuplicateId`] if two candidates or two slots
    /// share an identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_placement::store::{Candidate, EntityStore, Slot};
    ///
    /// let store = EntityStore::new(
    ///     vec![Candidate::new("S1", ["A", "B"], 3.0)],
    ///     vec![Slot::new("A", 1), Slot::new("B", 2)],
    /// )
    /// .unwrap();
    /// assert_eq!(store.total_capacity(), 3);
    /// assert_eq!(store.unplaced(), vec![0]);
    /// ```
    pub fn new(candidates: Vec<Candidate>, slots: Vec<Slot>) -> Result<Self, PlacementError> {
        let mut slot_ids = HashMap::with_capacity(slots.len());
        for (i, slot) in slots.iter().enumerate() {
            if slot_ids.insert(slot.id().to_string(), i).is_some() {
                return Err(PlacementError::DuplicateId {
                    kind: "slot",
                    id: slot.id().to_string(),
                });
            }
        }

        let mut candidate_ids = HashMap::with_capacity(candidates.len());
        for (i, candidate) in candidates.iter().enumerate() {
            if candidate_ids.insert(candidate.id().to_string(), i).is_some() {
                return Err(PlacementError::DuplicateId {
                    kind: "candidate",
                    id: candidate.id().to_string(),
                });
            }
        }

        let mut store = Self {
            candidates,
            slots,
            candidate_ids,
            slot_ids,
        };
        for candidate in &mut store.candidates {
            candidate.preferred_slots = candidate
                .preferences()
                .iter()
                .map(|id| store.slot_ids.get(id).copied())
                .collect();
        }
        store.reset();
        Ok(store)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn candidate(&self, index: usize) -> &Candidate {
        &self.candidates[index]
    }

    pub fn slot(&self, index: usize) -> &Slot {
        &self.slots[index]
    }

    pub fn candidate_index(&self, id: &str) -> Option<usize> {
        self.candidate_ids.get(id).copied()
    }

    pub fn slot_index(&self, id: &str) -> Option<usize> {
        self.slot_ids.get(id).copied()
    }

    /// Slot the candidate is assigned to, if any.
    pub fn assigned_slot(&self, candidate: usize) -> Option<&Slot> {
        self.candidates[candidate].assigned.map(|s| &self.slots[s])
    }

    /// Indices of unplaced candidates, in input order.
    pub fn unplaced(&self) -> Vec<usize> {
        self.candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_placed())
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of slots with remaining capacity, in input order.
    pub fn available(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_open())
            .map(|(i, _)| i)
            .collect()
    }

    /// First open slot in input order.
    pub fn first_available(&self) -> Option<usize> {
        self.slots.iter().position(Slot::is_open)
    }

    pub fn has_open_slot(&self) -> bool {
        self.slots.iter().any(Slot::is_open)
    }

    /// Assigns `candidate` to `slot`.
    ///
    /// # Panics
    ///
    /// If the slot has no remaining capacity or the candidate is already
    /// placed. Round control checks both before calling.
    pub fn place(&mut self, candidate: usize, slot: usize) {
        let c = &mut self.candidates[candidate];
        let s = &mut self.slots[slot];
        assert!(
            c.assigned.is_none(),
            "candidate `{}` is already placed in slot index {:?}",
            c.id(),
            c.assigned
        );
        assert!(
            s.remaining > 0,
            "slot `{}` has no remaining capacity for candidate `{}`",
            s.id(),
            c.id()
        );

        c.assigned = Some(slot);
        s.remaining -= 1;
        s.assigned.push(candidate);
    }

    /// Undoes the placement of `candidate` and returns the freed slot.
    ///
    /// # Panics
    ///
    /// If the candidate is not placed.
    pub fn revoke(&mut self, candidate: usize) -> usize {
        let c = &mut self.candidates[candidate];
        let slot = match c.assigned.take() {
            Some(slot) => slot,
            None => panic!("candidate `{}` is not placed", c.id()),
        };

        let s = &mut self.slots[slot];
        if let Some(pos) = s.assigned.iter().position(|&a| a == candidate) {
            s.assigned.remove(pos);
        }
        s.remaining += 1;
        debug_assert!(s.remaining <= s.capacity());
        slot
    }

    /// Returns every candidate and slot to the unassigned state.
    pub fn reset(&mut self) {
        for candidate in &mut self.candidates {
            candidate.assigned = None;
        }
        for slot in &mut self.slots {
            slot.remaining = slot.capacity();
            slot.assigned.clear();
        }
    }

    pub fn total_capacity(&self) -> usize {
        self.slots.iter().map(Slot::capacity).sum()
    }

    pub fn placed_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.is_placed()).count()
    }

    /// Verifies the capacity, placement and conservation invariants.
    ///
    /// Returns a description of the first violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut hosted = 0usize;
        for slot in &self.slots {
            if slot.remaining > slot.capacity() {
                return Err(format!(
                    "slot `{}` remaining {} exceeds capacity {}",
                    slot.id(),
                    slot.remaining,
                    slot.capacity()
                ));
            }
            if slot.assigned.len() != slot.capacity() - slot.remaining {
                return Err(format!(
                    "slot `{}` hosts {} candidates but {} capacity is taken",
                    slot.id(),
                    slot.assigned.len(),
                    slot.capacity() - slot.remaining
                ));
            }
            hosted += slot.assigned.len();
        }

        for (i, candidate) in self.candidates.iter().enumerate() {
            let holders = self
                .slots
                .iter()
                .enumerate()
                .filter(|(_, s)| s.assigned.contains(&i))
                .map(|(si, _)| si)
                .collect::<Vec<_>>();
            match candidate.assigned {
                Some(slot) if holders != [slot] => {
                    return Err(format!(
                        "candidate `{}` assigned to slot index {slot} but held by {holders:?}",
                        candidate.id()
                    ));
                }
                None if !holders.is_empty() => {
                    return Err(format!(
                        "unplaced candidate `{}` held by {holders:?}",
                        candidate.id()
                    ));
                }
                _ => {}
            }
        }

        if hosted != self.placed_count() {
            return Err(format!(
                "{hosted} hosted assignments but {} placed candidates",
                self.placed_count()
            ));
        }
        Ok(())
    }
}
