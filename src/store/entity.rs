//! Candidate and slot records.

/// An entity seeking exactly one slot.
///
/// The placed flag is not stored separately: a candidate is placed iff it
/// holds an assigned slot index, so the two can never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    id: String,
    preferences: Vec<String>,
    priority: f64,
    /// Preferences resolved against the owning store's slot index.
    /// `None` marks an identifier that names no slot.
    pub(crate) preferred_slots: Vec<Option<usize>>,
    pub(crate) assigned: Option<usize>,
}

impl Candidate {
    /// Creates an unplaced candidate.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_placement::store::Candidate;
    ///
    /// let c = Candidate::new("S1", ["F1", "F2"], 3.2);
    /// assert_eq!(c.preferences(), &["F1".to_string(), "F2".to_string()]);
    /// assert!(!c.is_placed());
    /// ```
    pub fn new<I, S>(id: impl Into<String>, preferences: I, priority: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            preferences: preferences.into_iter().map(Into::into).collect(),
            priority,
            preferred_slots: Vec::new(),
            assigned: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Preferred slot identifiers, best first.
    pub fn preferences(&self) -> &[String] {
        &self.preferences
    }

    pub fn priority(&self) -> f64 {
        self.priority
    }

    pub fn is_placed(&self) -> bool {
        self.assigned.is_some()
    }

    /// Arena index of the assigned slot, if placed.
    pub fn assigned_index(&self) -> Option<usize> {
        self.assigned
    }

    /// Zero-based rank of `slot` in this candidate's preferences.
    ///
    /// Duplicated preferences resolve to their first occurrence.
    pub fn rank_of(&self, slot: usize) -> Option<usize> {
        self.preferred_slots.iter().position(|&p| p == Some(slot))
    }

    /// Resolved preferences that name an existing slot, in rank order.
    pub(crate) fn known_preferences(&self) -> impl Iterator<Item = usize> + '_ {
        self.preferred_slots.iter().flatten().copied()
    }
}

/// A capacity-bounded destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    id: String,
    capacity: usize,
    pub(crate) remaining: usize,
    pub(crate) assigned: Vec<usize>,
}

impl Slot {
    /// Creates an empty slot with all of its capacity open.
    pub fn new(id: impl Into<String>, capacity: usize) -> Self {
        Self {
            id: id.into(),
            capacity,
            remaining: capacity,
            assigned: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Total capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Capacity not yet taken.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Candidate indices currently hosted, in placement order.
    pub fn assigned(&self) -> &[usize] {
        &self.assigned
    }

    pub fn is_open(&self) -> bool {
        self.remaining > 0
    }

    /// Fraction of capacity still open, `remaining / capacity`.
    ///
    /// Zero-capacity slots report full headroom; they are never open, so
    /// the value is only observable through this accessor.
    pub fn headroom(&self) -> f64 {
        if self.capacity == 0 {
            1.0
        } else {
            self.remaining as f64 / self.capacity as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_slot_is_fully_open() {
        let slot = Slot::new("F1", 3);
        assert_eq!(slot.remaining(), 3);
        assert!(slot.is_open());
        assert!(slot.assigned().is_empty());
        assert!((slot.headroom() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_capacity_slot_is_closed() {
        let slot = Slot::new("F0", 0);
        assert!(!slot.is_open());
    }

    #[test]
    fn test_rank_uses_first_occurrence() {
        let mut c = Candidate::new("S1", ["A", "B", "A"], 2.0);
        c.preferred_slots = vec![Some(0), Some(1), Some(0)];
        assert_eq!(c.rank_of(0), Some(0));
        assert_eq!(c.rank_of(1), Some(1));
        assert_eq!(c.rank_of(2), None);
    }

    #[test]
    fn test_known_preferences_skip_unknown_ids() {
        let mut c = Candidate::new("S1", ["A", "ghost", "B"], 2.0);
        c.preferred_slots = vec![Some(0), None, Some(1)];
        assert_eq!(c.known_preferences().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(c.rank_of(1), Some(2));
    }
}
