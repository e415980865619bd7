//! Text reports: placement listing and strategy comparison.

use std::cmp::Ordering;
use std::fmt;

use crate::round::PlacementResult;
use crate::store::EntityStore;

/// One line per placed candidate, in input order.
///
/// `"<candidate> -> <slot> (<rank+1>. preference)"` for a preferred slot,
/// `"<candidate> -> <slot> (non-preference)"` otherwise.
///
/// # Examples
///
/// ```
/// use u_placement::report::placement_report;
/// use u_placement::store::{Candidate, EntityStore, Slot};
///
/// let mut store = EntityStore::new(
///     vec![
///         Candidate::new("S1", ["A", "B"], 3.0),
///         Candidate::new("S2", ["A"], 2.0),
///     ],
///     vec![Slot::new("A", 0), Slot::new("B", 2)],
/// )
/// .unwrap();
/// store.place(0, 1);
/// store.place(1, 1);
///
/// assert_eq!(
///     placement_report(&store),
///     vec!["S1 -> B (2. preference)", "S2 -> B (non-preference)"]
/// );
/// ```
pub fn placement_report(store: &EntityStore) -> Vec<String> {
    store
        .candidates()
        .iter()
        .filter_map(|c| {
            let slot = c.assigned_index()?;
            let label = match c.rank_of(slot) {
                Some(rank) => format!("{}. preference", rank + 1),
                None => "non-preference".to_string(),
            };
            Some(format!("{} -> {} ({label})", c.id(), store.slot(slot).id()))
        })
        .collect()
}

/// Which side of a comparison did better on one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Left,
    Right,
    Equal,
}

impl Verdict {
    fn lower_wins(left: f64, right: f64) -> Self {
        match left.partial_cmp(&right) {
            Some(Ordering::Less) => Verdict::Left,
            Some(Ordering::Greater) => Verdict::Right,
            _ => Verdict::Equal,
        }
    }

    fn higher_wins(left: f64, right: f64) -> Self {
        Self::lower_wins(right, left)
    }
}

/// A compared metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Iterations,
    Operations,
    Time,
    Satisfaction,
    Rejections,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Iterations,
        Metric::Operations,
        Metric::Time,
        Metric::Satisfaction,
        Metric::Rejections,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Iterations => "Total iterations",
            Metric::Operations => "Total operations",
            Metric::Time => "Run time (s)",
            Metric::Satisfaction => "Satisfaction score",
            Metric::Rejections => "Total rejections",
        }
    }
}

/// Side-by-side comparison of two completed runs.
///
/// Lower is better for iterations, operations and time; higher is better
/// for satisfaction. Rejections are listed without a verdict.
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    left: &'a PlacementResult,
    right: &'a PlacementResult,
}

impl<'a> Comparison<'a> {
    pub fn new(left: &'a PlacementResult, right: &'a PlacementResult) -> Self {
        Self { left, right }
    }

    /// Verdict for `metric`, or `None` for metrics that are not judged.
    pub fn verdict(&self, metric: Metric) -> Option<Verdict> {
        let (l, r) = (&self.left.metrics, &self.right.metrics);
        match metric {
            Metric::Iterations => Some(Verdict::lower_wins(
                l.iterations as f64,
                r.iterations as f64,
            )),
            Metric::Operations => Some(Verdict::lower_wins(
                l.operations as f64,
                r.operations as f64,
            )),
            Metric::Time => Some(Verdict::lower_wins(l.elapsed_secs(), r.elapsed_secs())),
            Metric::Satisfaction => Some(Verdict::higher_wins(
                l.satisfaction as f64,
                r.satisfaction as f64,
            )),
            Metric::Rejections => None,
        }
    }

    fn cell(result: &PlacementResult, metric: Metric) -> String {
        let m = &result.metrics;
        match metric {
            Metric::Iterations => m.iterations.to_string(),
            Metric::Operations => m.operations.to_string(),
            Metric::Time => format!("{:.4}", m.elapsed_secs()),
            Metric::Satisfaction => m.satisfaction.to_string(),
            Metric::Rejections => m.rejections.to_string(),
        }
    }

    /// Analysis sentence for a judged metric.
    pub fn analysis(&self, metric: Metric) -> Option<String> {
        let verdict = self.verdict(metric)?;
        let winner = match verdict {
            Verdict::Left => self.left.strategy.as_str(),
            Verdict::Right => self.right.strategy.as_str(),
            Verdict::Equal => {
                let topic = match metric {
                    Metric::Iterations => "Iterations",
                    Metric::Operations => "Operations",
                    Metric::Time => "Time",
                    _ => "Satisfaction",
                };
                return Some(format!("- {topic}: equal"));
            }
        };
        let sentence = match metric {
            Metric::Iterations => format!("- Iterations: {winner} finished in fewer iterations"),
            Metric::Operations => format!("- Operations: {winner} performed fewer operations"),
            Metric::Time => format!("- Time: {winner} was faster"),
            _ => format!("- Satisfaction: {winner} achieved higher satisfaction"),
        };
        Some(sentence)
    }
}

impl fmt::Display for Comparison<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(60);
        let light = "-".repeat(55);
        let (l, r) = (&self.left.strategy, &self.right.strategy);

        writeln!(f, "{heavy}")?;
        writeln!(f, "{:^60}", format!("{l} vs {r} comparison"))?;
        writeln!(f, "{heavy}")?;
        writeln!(f)?;
        writeln!(f, "{:<25} {:>15} {:>15}", "Metric", l, r)?;
        writeln!(f, "{light}")?;
        for metric in Metric::ALL {
            writeln!(
                f,
                "{:<25} {:>15} {:>15}",
                metric.label(),
                Self::cell(self.left, metric),
                Self::cell(self.right, metric)
            )?;
        }
        writeln!(f, "{light}")?;
        writeln!(f)?;
        writeln!(f, "Analysis:")?;
        for metric in Metric::ALL {
            if let Some(line) = self.analysis(metric) {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}
