//! Heuristic strategy: global scored matching per round.
//!
//! # Match score
//!
//! ```text
//! priority   = priority / 4
//! preference = (5 - rank) / 5   if the slot is a preference, else 0
//! fit        = remaining / capacity
//!
//! score = 0.4 * priority + 0.3 * preference + 0.3 * fit
//! ```
//!
//! For a non-preference pair the preference term is zero, which is the
//! same as `0.4 * priority + 0.3 * fit`; the weight is not redistributed.

use rand::Rng;
use tracing::{debug, trace};

use super::forced_round;
use crate::metrics::rank_points;
use crate::ranking::{RankEngine, RankRule};
use crate::round::{Phase, PlacementStrategy};
use crate::store::{Candidate, EntityStore, Slot};

/// Upper end of the expected priority range.
pub const PRIORITY_SCALE: f64 = 4.0;

pub const PRIORITY_WEIGHT: f64 = 0.4;
pub const PREFERENCE_WEIGHT: f64 = 0.3;
pub const FIT_WEIGHT: f64 = 0.3;

/// Inputs of the match score for one candidate–slot pair, captured before
/// any placement of the current round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchFeatures {
    /// Candidate priority score.
    pub priority: f64,
    /// Zero-based rank of the slot in the candidate's preferences.
    pub rank: Option<usize>,
    /// `remaining / capacity` of the slot.
    pub headroom: f64,
}

impl MatchFeatures {
    /// Reads the features of `candidate` paired with `slot`.
    ///
    /// The rank is found by identifier; duplicated preferences resolve to
    /// their first occurrence.
    pub fn of(candidate: &Candidate, slot: &Slot) -> Self {
        Self {
            priority: candidate.priority(),
            rank: candidate
                .preferences()
                .iter()
                .position(|p| p == slot.id()),
            headroom: slot.headroom(),
        }
    }

    pub fn is_preference(&self) -> bool {
        self.rank.is_some()
    }
}

struct PriorityTerm;

impl RankRule<MatchFeatures, ()> for PriorityTerm {
    fn name(&self) -> &str {
        "Priority"
    }

    fn score(&self, f: &MatchFeatures, _ctx: &()) -> f64 {
        f.priority / PRIORITY_SCALE
    }
}

struct PreferenceTerm;

impl RankRule<MatchFeatures, ()> for PreferenceTerm {
    fn name(&self) -> &str {
        "Preference"
    }

    fn score(&self, f: &MatchFeatures, _ctx: &()) -> f64 {
        f.rank.map_or(0.0, |rank| rank_points(rank) as f64 / 5.0)
    }
}

struct FitTerm;

impl RankRule<MatchFeatures, ()> for FitTerm {
    fn name(&self) -> &str {
        "Fit"
    }

    fn score(&self, f: &MatchFeatures, _ctx: &()) -> f64 {
        f.headroom
    }
}

fn scoring_engine() -> RankEngine<MatchFeatures, ()> {
    RankEngine::new()
        .with_weighted_rule(PriorityTerm, PRIORITY_WEIGHT)
        .with_weighted_rule(PreferenceTerm, PREFERENCE_WEIGHT)
        .with_weighted_rule(FitTerm, FIT_WEIGHT)
}

/// Match score of `candidate` placed into `slot` at the slot's current
/// occupancy.
///
/// # Examples
///
/// ```
/// use u_placement::store::{Candidate, Slot};
/// use u_placement::strategy::match_score;
///
/// let c = Candidate::new("S1", ["A", "B"], 4.0);
/// // 0.4 * 1.0 + 0.3 * 1.0 + 0.3 * 1.0
/// assert!((match_score(&c, &Slot::new("A", 2)) - 1.0).abs() < 1e-12);
/// // 0.4 * 1.0 + 0.3 * 1.0, no preference term
/// assert!((match_score(&c, &Slot::new("Z", 2)) - 0.7).abs() < 1e-12);
/// ```
pub fn match_score(candidate: &Candidate, slot: &Slot) -> f64 {
    scoring_engine().score(&MatchFeatures::of(candidate, slot), &())
}

/// Scored-matching placement.
///
/// Per round (phases 1–2), every unplaced candidate is paired with its
/// open preferred slots (phase 1) or with every open slot (phase 2). All
/// pairs are scored against the occupancy at the start of the round,
/// sorted by descending score (ties keep enumeration order), and committed
/// best-first. A pair is skipped when its candidate was already placed
/// this round or its slot has filled up; scores are not recomputed.
///
/// Phase 3 uses the shared forced placement in descending priority.
///
/// Operations: one per scored pair, one per forced placement.
#[derive(Debug, Clone, Copy, Default)]
pub struct Heuristic;

impl Heuristic {
    /// Candidate–slot pairs of one round, in enumeration order.
    fn enumerate(store: &EntityStore, unplaced: &[usize], phase: Phase) -> Vec<(usize, usize)> {
        let open = store.available();
        let mut pairs = Vec::new();
        for &candidate in unplaced {
            if phase.policy().fallback_to_open {
                pairs.extend(open.iter().map(|&slot| (candidate, slot)));
            } else {
                pairs.extend(
                    store
                        .candidate(candidate)
                        .known_preferences()
                        .filter(|&slot| store.slot(slot).is_open())
                        .map(|slot| (candidate, slot)),
                );
            }
        }
        pairs
    }
}

impl PlacementStrategy for Heuristic {
    fn name(&self) -> &str {
        "Heuristic"
    }

    fn place_round<R: Rng>(
        &self,
        store: &mut EntityStore,
        unplaced: &[usize],
        phase: Phase,
        _rng: &mut R,
        operations: &mut usize,
    ) -> Vec<usize> {
        if phase.policy().forced {
            return forced_round(store, unplaced, operations);
        }

        let pairs = Self::enumerate(store, unplaced, phase);
        *operations += pairs.len();

        let features: Vec<MatchFeatures> = pairs
            .iter()
            .map(|&(c, s)| MatchFeatures::of(store.candidate(c), store.slot(s)))
            .collect();
        let engine = scoring_engine();
        debug!(
            event = "score_pairs",
            phase = phase.number(),
            pairs = pairs.len(),
            rules = ?engine.rule_names(),
        );
        let ranked = engine.rank(&features, &());

        let mut placed = Vec::new();
        for (i, score) in ranked {
            let (candidate, slot) = pairs[i];
            if store.candidate(candidate).is_placed() || !store.slot(slot).is_open() {
                continue;
            }
            trace!(
                candidate = store.candidate(candidate).id(),
                slot = store.slot(slot).id(),
                score,
                "commit match"
            );
            store.place(candidate, slot);
            placed.push(candidate);
        }
        placed
    }
}
