//! Weighted rule ranking.
//!
//! A small composition engine used by both placement strategies: the
//! greedy strategy ranks unplaced candidates by a single priority rule,
//! the heuristic strategy ranks candidate–slot pairs by a weighted sum of
//! priority, preference and fit rules.
//!
//! Rankings are descending and stable, so equal scores keep their input
//! order. This makes every ranking a pure function of its input sequence.

mod engine;
mod types;

pub use engine::RankEngine;
pub use types::RankRule;
