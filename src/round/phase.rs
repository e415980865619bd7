//! Placement phases and the escalation rule.

use std::fmt;

use crate::metrics::Escalation;

/// Escalating placement policies.
///
/// A run starts in [`Phase::Preference`] and moves one step up every time
/// the current phase stalls for `stall_limit` consecutive rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Phase 1: place only into preferred slots.
    Preference,
    /// Phase 2: preferred slots first, any open slot otherwise.
    PreferenceThenOpen,
    /// Phase 3: forced placement into any open slot, no rejection.
    Forced,
}

/// What a phase allows a strategy to do during one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhasePolicy {
    /// Preferred slots are tried, in preference order.
    pub scan_preferences: bool,
    /// Candidates with no open preferred slot may take any open slot.
    pub fallback_to_open: bool,
    /// Preferences are ignored; candidates take the first open slot.
    pub forced: bool,
    /// Placements made this round are subject to stochastic rejection.
    pub rejection: bool,
}

const POLICIES: [PhasePolicy; 3] = [
    PhasePolicy {
        scan_preferences: true,
        fallback_to_open: false,
        forced: false,
        rejection: true,
    },
    PhasePolicy {
        scan_preferences: true,
        fallback_to_open: true,
        forced: false,
        rejection: true,
    },
    PhasePolicy {
        scan_preferences: false,
        fallback_to_open: false,
        forced: true,
        rejection: false,
    },
];

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Preference, Phase::PreferenceThenOpen, Phase::Forced];

    /// One-based phase number, as shown in logs.
    pub fn number(self) -> u8 {
        match self {
            Phase::Preference => 1,
            Phase::PreferenceThenOpen => 2,
            Phase::Forced => 3,
        }
    }

    /// The following phase, or `None` from the last one.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Preference => Some(Phase::PreferenceThenOpen),
            Phase::PreferenceThenOpen => Some(Phase::Forced),
            Phase::Forced => None,
        }
    }

    pub fn policy(self) -> PhasePolicy {
        POLICIES[self.number() as usize - 1]
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Escalation rule: the phase to move to after `no_progress` consecutive
/// rounds without a placement, if any.
pub fn next_phase(phase: Phase, no_progress: usize, stall_limit: usize) -> Option<Phase> {
    if no_progress >= stall_limit {
        phase.next()
    } else {
        None
    }
}

/// Tracks the current phase and the consecutive non-progress rounds.
#[derive(Debug, Clone)]
pub struct PhaseTracker {
    phase: Phase,
    no_progress: usize,
    stall_limit: usize,
}

impl PhaseTracker {
    pub fn new(stall_limit: usize) -> Self {
        Self {
            phase: Phase::Preference,
            no_progress: 0,
            stall_limit,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Consecutive rounds that placed nobody.
    pub fn no_progress(&self) -> usize {
        self.no_progress
    }

    /// Records the outcome of round `iteration`, which placed `placed`
    /// candidates before rejection.
    ///
    /// Returns the escalation event when the phase advances.
    pub fn record_round(&mut self, iteration: usize, placed: usize) -> Option<Escalation> {
        if placed == 0 {
            self.no_progress += 1;
        } else {
            self.no_progress = 0;
        }

        let next = next_phase(self.phase, self.no_progress, self.stall_limit)?;
        self.phase = next;
        self.no_progress = 0;
        Some(Escalation {
            iteration,
            phase: next,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_table() {
        let p1 = Phase::Preference.policy();
        assert!(p1.scan_preferences && !p1.fallback_to_open && p1.rejection);

        let p2 = Phase::PreferenceThenOpen.policy();
        assert!(p2.scan_preferences && p2.fallback_to_open && p2.rejection);

        let p3 = Phase::Forced.policy();
        assert!(p3.forced && !p3.scan_preferences && !p3.rejection);
    }

    #[test]
    fn test_numbers_and_order() {
        let numbers: Vec<u8> = Phase::ALL.iter().map(|p| p.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(Phase::Preference < Phase::Forced);
        assert_eq!(Phase::Forced.to_string(), "3");
    }

    #[test]
    fn test_next_phase_rule() {
        assert_eq!(next_phase(Phase::Preference, 4, 5), None);
        assert_eq!(
            next_phase(Phase::Preference, 5, 5),
            Some(Phase::PreferenceThenOpen)
        );
        assert_eq!(
            next_phase(Phase::PreferenceThenOpen, 7, 5),
            Some(Phase::Forced)
        );
        assert_eq!(next_phase(Phase::Forced, 100, 5), None);
    }

    #[test]
    fn test_tracker_escalates_after_stall() {
        let mut tracker = PhaseTracker::new(5);
        for i in 1..=4 {
            assert!(tracker.record_round(i, 0).is_none());
        }
        let esc = tracker.record_round(5, 0).unwrap();
        assert_eq!(esc.iteration, 5);
        assert_eq!(esc.phase, Phase::PreferenceThenOpen);
        assert_eq!(tracker.phase(), Phase::PreferenceThenOpen);
        assert_eq!(tracker.no_progress(), 0);
    }

    #[test]
    fn test_progress_resets_counter() {
        let mut tracker = PhaseTracker::new(5);
        for i in 1..=4 {
            tracker.record_round(i, 0);
        }
        assert!(tracker.record_round(5, 2).is_none());
        assert_eq!(tracker.no_progress(), 0);
        for i in 6..=9 {
            assert!(tracker.record_round(i, 0).is_none());
        }
        assert!(tracker.record_round(10, 0).is_some());
    }

    #[test]
    fn test_tracker_stays_in_forced() {
        let mut tracker = PhaseTracker::new(1);
        assert!(tracker.record_round(1, 0).is_some());
        assert!(tracker.record_round(2, 0).is_some());
        assert_eq!(tracker.phase(), Phase::Forced);
        assert!(tracker.record_round(3, 0).is_none());
        assert_eq!(tracker.phase(), Phase::Forced);
    }
}
