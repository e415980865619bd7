//! Weighted rule composition engine.

use super::types::RankRule;

/// A rule paired with its weight.
struct WeightedRule<T, C> {
    rule: Box<dyn RankRule<T, C>>,
    weight: f64,
}

/// Engine combining several rules into one weighted score and ranking
/// items by it.
///
/// The composite score is the weighted sum of the rule scores, summed in
/// the order the rules were added. Ranking is descending and stable:
/// items with equal composite scores keep their input order.
///
/// # Examples
///
/// ```
/// use u_placement::ranking::{RankEngine, RankRule};
///
/// struct Value;
/// impl RankRule<f64, ()> for Value {
///     fn name(&self) -> &str { "Value" }
///     fn score(&self, item: &f64, _ctx: &()) -> f64 { *item }
/// }
///
/// let engine = RankEngine::<f64, ()>::new().with_rule(Value);
/// assert_eq!(engine.sort_indices(&[1.0, 3.0, 2.0], &()), vec![1, 2, 0]);
/// ```
pub struct RankEngine<T, C> {
    rules: Vec<WeightedRule<T, C>>,
}

impl<T, C> RankEngine<T, C> {
    /// Creates an engine without rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a rule with weight 1.0.
    pub fn with_rule<R: RankRule<T, C> + 'static>(self, rule: R) -> Self {
        self.with_weighted_rule(rule, 1.0)
    }

    /// Adds a rule with a custom weight.
    pub fn with_weighted_rule<R: RankRule<T, C> + 'static>(
        mut self,
        rule: R,
        weight: f64,
    ) -> Self {
        self.rules.push(WeightedRule {
            rule: Box::new(rule),
            weight,
        });
        self
    }

    /// Returns the names of all rules in order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|wr| wr.rule.name()).collect()
    }

    /// Composite weighted score of a single item.
    pub fn score(&self, item: &T, context: &C) -> f64 {
        self.rules
            .iter()
            .map(|wr| wr.rule.score(item, context) * wr.weight)
            .sum()
    }

    /// Scores every item once, then returns indices ordered by descending
    /// score. Ties keep input order.
    pub fn sort_indices(&self, items: &[T], context: &C) -> Vec<usize> {
        let scores: Vec<f64> = items.iter().map(|item| self.score(item, context)).collect();
        rank_descending(&scores)
    }

    /// Returns `(index, score)` pairs ordered by descending score.
    pub fn rank(&self, items: &[T], context: &C) -> Vec<(usize, f64)> {
        let scores: Vec<f64> = items.iter().map(|item| self.score(item, context)).collect();
        rank_descending(&scores)
            .into_iter()
            .map(|i| (i, scores[i]))
            .collect()
    }
}

impl<T, C> Default for RankEngine<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable descending order of `scores` under `f64::total_cmp`.
fn rank_descending(scores: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    indices
}
