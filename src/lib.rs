//! Capacity-bounded candidate placement.
//!
//! Assigns candidates (e.g. students) to slots with finite capacity (e.g.
//! internship firms) using two competing strategies under one shared,
//! phased round loop, and measures each run so the strategies can be
//! compared:
//!
//! - **Greedy**: candidates in descending priority, each taking the first
//!   open slot from its own preference list.
//! - **Heuristic**: every candidate–slot pair is scored
//!   (priority, preference rank, slot headroom) and pairs are committed
//!   best-first.
//!
//! Each round may stochastically reject fresh placements, returning the
//! candidates to the unplaced pool. When a phase stalls, the loop escalates
//! from preference-only placement, to preference-then-any-open-slot, to
//! forced placement without rejection.
//!
//! # Example
//!
//! ```
//! use u_placement::report::{placement_report, Comparison};
//! use u_placement::round::{PlacementConfig, PlacementRunner};
//! use u_placement::store::{Candidate, EntityStore, Slot};
//! use u_placement::strategy::{Greedy, Heuristic};
//!
//! let store = EntityStore::new(
//!     vec![
//!         Candidate::new("S1", ["F1", "F2"], 3.6),
//!         Candidate::new("S2", ["F1"], 2.9),
//!         Candidate::new("S3", ["F2", "F1"], 3.1),
//!     ],
//!     vec![Slot::new("F1", 1), Slot::new("F2", 2)],
//! )
//! .unwrap();
//! let config = PlacementConfig::default().with_seed(42);
//!
//! let greedy = PlacementRunner::run(&Greedy, &store, &config).unwrap();
//! let heuristic = PlacementRunner::run(&Heuristic, &store, &config).unwrap();
//!
//! assert!(greedy.is_complete() && heuristic.is_complete());
//! for line in placement_report(&greedy.store) {
//!     println!("{line}");
//! }
//! println!("{}", Comparison::new(&greedy, &heuristic));
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for configuration and metrics.
//! - `parallel`: [`compare::run_both`] runs the two strategies on rayon.
//! - `cli`: the `u-placement` command-line binary.

pub mod compare;
pub mod error;
pub mod metrics;
pub mod ranking;
pub mod rejection;
pub mod report;
pub mod round;
pub mod sink;
pub mod source;
pub mod store;
pub mod strategy;

pub use error::PlacementError;
