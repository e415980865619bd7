//! Entity store: candidates, slots and their mutable assignment state.
//!
//! The store is an arena. Candidates and slots are addressed by index,
//! with identifier maps for lookup, and identifier equality is preserved:
//! a preference matches a slot iff the identifiers are equal.
//!
//! Only [`EntityStore::place`] and [`EntityStore::revoke`] change
//! assignments. Both keep the slot side (`remaining`, hosted list) and the
//! candidate side in lockstep, so the capacity, placement and conservation
//! invariants hold after every call.

mod arena;
mod entity;

pub use arena::EntityStore;
pub use entity::{Candidate, Slot};
